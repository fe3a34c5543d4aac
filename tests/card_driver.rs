mod common;

#[cfg(all(test, feature = "tokio"))]
mod tests {
    use std::sync::Arc;

    use crate::common::*;
    use hc_dm_cards::*;
    use serde_json::json;

    fn lamp() -> Device {
        let mut device = Device::from_json(json!({
            "id": "hue.0.lamp-1",
            "manufacturer": "Acme",
            "model": "Bulb",
            "hasDetails": true,
            "actions": [{ "id": "identify", "label": "Identify" }]
        }))
        .unwrap();
        device.color = Some("#fff".to_owned());
        device
    }

    #[tokio::test]
    async fn test_icon_result_delivered() {
        let conn = Arc::new(FakeConnection::new().with_file("hue.0", "Acme_Bulb.webp", "image/webp", "AAAA"));
        let (driver, mut events) = CardDriver::new(conn.clone(), 8);
        let mut card = DeviceCard::new(lamp(), config());

        driver.mount(&mut card).unwrap();
        assert!(driver.mount(&mut card).is_none());

        let event = events.recv().await.unwrap();
        assert!(matches!(event, CardEvent::Icon(_)));
        assert!(driver.handle_event(&mut card, event).unwrap().is_none());
        assert_eq!(card.icon().image(), Some("data:image/webp;base64,AAAA"));
        assert_eq!(conn.file_reads(), 1);
    }

    #[tokio::test]
    async fn test_action_refresh_chain() {
        let conn = Arc::new(
            FakeConnection::new().with_details(Ok(details_payload(json!({ "name": "fresh" })))),
        );
        let handler = Arc::new(RecordingActionHandler::new(Ok(ActionOutcome::Refresh)));
        let (driver, mut events) = CardDriver::new(conn.clone(), 8);
        let mut card = DeviceCard::new(lamp(), config());

        driver
            .invoke_action(&card, handler.clone(), "identify")
            .unwrap();
        let event = events.recv().await.unwrap();
        assert!(matches!(event, CardEvent::Action(_)));

        let follow_up = driver.handle_event(&mut card, event).unwrap();
        assert!(follow_up.is_some());

        let event = events.recv().await.unwrap();
        assert!(matches!(event, CardEvent::Details(_)));
        driver.handle_event(&mut card, event).unwrap();

        assert_eq!(handler.calls().len(), 1);
        assert_eq!(card.details().data().get("name"), Some(&json!("fresh")));
    }

    #[tokio::test]
    async fn test_open_details_via_driver() {
        let conn = Arc::new(
            FakeConnection::new().with_details(Ok(details_payload(json!({ "name": "x" })))),
        );
        let (driver, mut events) = CardDriver::new(conn, 8);
        let mut card = DeviceCard::new(lamp(), config());

        driver.open_details(&mut card).unwrap();
        assert!(driver.open_details(&mut card).is_none());
        assert_eq!(card.detail_phase(), DetailPhase::Loading);

        let event = events.recv().await.unwrap();
        driver.handle_event(&mut card, event).unwrap();
        assert_eq!(card.detail_phase(), DetailPhase::Open);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_requests() {
        let (driver, mut events) = CardDriver::new(Arc::new(HangingConnection), 8);
        let mut card = DeviceCard::new(lamp(), config());

        let icon = driver.mount(&mut card).unwrap();
        let details = driver.open_details(&mut card).unwrap();

        driver.shutdown();
        assert!(driver.is_shut_down());
        icon.await.unwrap();
        details.await.unwrap();

        drop(driver);
        assert!(events.recv().await.is_none());
        assert_eq!(card.icon(), &IconState::Fetching);
    }

    #[tokio::test]
    async fn test_card_reused_after_shutdown() {
        let (driver, _events) = CardDriver::new(Arc::new(HangingConnection), 8);
        let mut card = DeviceCard::new(lamp(), config());

        let icon = driver.mount(&mut card).unwrap();
        driver.shutdown();
        icon.await.unwrap();
        assert_eq!(card.icon(), &IconState::Fetching);

        card.unmount();
        assert_eq!(card.icon(), &IconState::Unresolved);

        let conn = Arc::new(FakeConnection::new().with_file("hue.0", "Acme_Bulb.webp", "image/webp", "AAAA"));
        let (driver, mut events) = CardDriver::new(conn, 8);
        assert!(driver.mount(&mut card).is_some());

        let event = events.recv().await.unwrap();
        driver.handle_event(&mut card, event).unwrap();
        assert_eq!(card.icon().image(), Some("data:image/webp;base64,AAAA"));
    }

    #[tokio::test]
    async fn test_unknown_action_not_spawned() {
        let (driver, _events) = CardDriver::new(Arc::new(FakeConnection::new()), 8);
        let card = DeviceCard::new(lamp(), config());
        let handler = Arc::new(RecordingActionHandler::new(Ok(ActionOutcome::Done)));

        assert!(matches!(
            driver.invoke_action(&card, handler.clone(), "nope"),
            Err(CardError::UnknownAction { .. })
        ));
        assert!(handler.calls().is_empty());
    }
}
