mod common;

#[cfg(test)]
mod tests {
    use crate::common::*;
    use hc_dm_cards::*;

    fn lamp() -> Device {
        let mut device = Device::new("hue.0.lamp-1");
        device.manufacturer = Some("Acme".into());
        device.model = Some("Bulb".into());
        device
    }

    #[tokio::test]
    async fn test_existing_icon_never_fetches() {
        let mut device = lamp();
        device.icon = Some("https://example.com/lamp.png".to_owned());
        let mut card = DeviceCard::new(device, config());
        let conn = FakeConnection::new();

        assert!(card.mount().is_none());
        assert!(!card.resolve_icon(&conn).await);
        assert_eq!(
            card.icon(),
            &IconState::Resolved("https://example.com/lamp.png".to_owned())
        );
        assert_eq!(conn.file_reads(), 0);
    }

    #[tokio::test]
    async fn test_missing_icon_fetched_once() {
        let conn = FakeConnection::new().with_file("hue.0", "Acme_Bulb.webp", "image/webp", "AAAA");
        let mut resolver = IconResolver::new();
        let device = lamp();
        let config = config();

        assert_eq!(resolver.state(), &IconState::Unresolved);
        let request = resolver.mount(&device, &config).unwrap();
        assert_eq!(request.scope(), "hue.0");
        assert_eq!(request.file_name(), "Acme_Bulb.webp");
        assert_eq!(resolver.state(), &IconState::Fetching);

        // mounting again for the same device and instance does nothing
        assert!(resolver.mount(&device, &config).is_none());

        let response = request.fetch(&conn).await;
        assert!(resolver.apply(response));
        assert_eq!(
            resolver.state(),
            &IconState::Resolved("data:image/webp;base64,AAAA".to_owned())
        );
        assert!(resolver.state().is_settled());
        assert_eq!(conn.file_reads(), 1);
    }

    #[tokio::test]
    async fn test_unmount_drops_running_lookup() {
        let conn = FakeConnection::new().with_file("hue.0", "Acme_Bulb.webp", "image/webp", "AAAA");
        let mut resolver = IconResolver::new();
        let device = lamp();
        let config = config();

        let stale = resolver.mount(&device, &config).unwrap();
        resolver.unmount();
        assert_eq!(resolver.state(), &IconState::Unresolved);

        let current = resolver.mount(&device, &config).unwrap();
        let stale = stale.fetch(&conn).await;
        let current = current.fetch(&conn).await;

        assert!(!resolver.apply(stale));
        assert!(resolver.apply(current));
        assert_eq!(conn.file_reads(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_ends_absent() {
        let conn = FakeConnection::new();
        let mut card = DeviceCard::new(lamp(), config());

        assert!(card.resolve_icon(&conn).await);
        assert_eq!(card.icon(), &IconState::Absent);
        assert_eq!(conn.file_reads(), 1);

        // no retry within the same mount
        assert!(!card.resolve_icon(&conn).await);
        assert_eq!(conn.file_reads(), 1);
    }

    #[test]
    fn test_data_url() {
        let short = FileContent {
            mime_type: "png".to_owned(),
            data: "AAAA".to_owned(),
        };
        assert_eq!(data_url(&short), "data:image/png;base64,AAAA");

        let embedded = FileContent {
            mime_type: "image/png".to_owned(),
            data: "data:image/png;base64,BBBB".to_owned(),
        };
        assert_eq!(data_url(&embedded), "data:image/png;base64,BBBB");
    }

    #[tokio::test]
    async fn test_upload_supersedes_pending_fetch() {
        let conn = FakeConnection::new().with_file("hue.0", "Acme_Bulb.webp", "image/webp", "AAAA");
        let mut card = DeviceCard::new(lamp(), config());

        let request = card.mount().unwrap();
        assert!(card.upload_image("data:image/png;base64,UPLOAD"));

        let response = request.fetch(&conn).await;
        assert!(!card.apply_icon(response));
        assert_eq!(
            card.icon(),
            &IconState::Resolved("data:image/png;base64,UPLOAD".to_owned())
        );
    }

    #[test]
    fn test_empty_upload_is_ignored() {
        let mut device = lamp();
        device.icon = Some("https://example.com/lamp.png".to_owned());
        let mut card = DeviceCard::new(device, config());
        card.mount();

        assert!(!card.upload_image(""));
        assert_eq!(card.icon().image(), Some("https://example.com/lamp.png"));
    }

    #[tokio::test]
    async fn test_remount_on_identity_change() {
        let conn = FakeConnection::new()
            .with_file("hue.0", "Acme_Bulb.webp", "image/webp", "AAAA")
            .with_file("hue.1", "Acme_Bulb.webp", "image/webp", "BBBB");
        let mut card = DeviceCard::new(lamp(), config());
        let stale = card.mount().unwrap();

        // same device record again: nothing new to fetch
        assert!(card.update_device(lamp()).is_none());

        // new instance: the lookup starts over and the old one is dropped
        let request = card
            .set_instance(CardConfig::new("hue.1".parse().unwrap()))
            .unwrap();
        assert_eq!(request.scope(), "hue.1");

        let old = stale.fetch(&conn).await;
        assert!(!card.apply_icon(old));
        assert_eq!(card.icon(), &IconState::Fetching);

        let fresh = request.fetch(&conn).await;
        assert!(card.apply_icon(fresh));
        assert_eq!(card.icon().image(), Some("data:image/webp;base64,BBBB"));

        // a different device gets its own lookup
        let mut other = lamp();
        other.id = "hue.0.lamp-2".to_owned();
        other.model = None;
        let request = card.update_device(other).unwrap();
        assert_eq!(request.file_name(), "Acme_hue.0.lamp-2.webp");
        assert_eq!(request.device_id(), "hue.0.lamp-2");
    }

    #[test]
    fn test_host_supplied_icon_is_adopted() {
        let mut card = DeviceCard::new(lamp(), config());
        card.mount().unwrap();

        let mut with_icon = lamp();
        with_icon.icon = Some("https://example.com/new.png".to_owned());
        assert!(card.update_device(with_icon).is_none());
        assert_eq!(card.icon().image(), Some("https://example.com/new.png"));
    }
}
