use shared_types::LocationRecord;

const CALL_LABEL: &str = "تماس";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Popup body for a center's marker.
pub fn popup_html(record: &LocationRecord) -> String {
    let phone_link = record
        .phone
        .as_deref()
        .map(|phone| {
            format!(
                r#"<a class="popup-phone" href="tel:{}">{CALL_LABEL}</a>"#,
                urlencoding::encode(phone)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<strong class="popup-name">{}</strong><br><span class="popup-address">{}</span><br>{}"#,
        escape_html(&record.name),
        escape_html(&record.address),
        phone_link
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn popup_escapes_fields_and_links_phone() {
        let record = LocationRecord {
            name: "<script>".to_string(),
            address: "A & B".to_string(),
            phone: Some("+98 21 8888".to_string()),
            ..Default::default()
        };
        let html = popup_html(&record);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains(r#"href="tel:%2B98%2021%208888""#));
    }

    #[test]
    fn popup_without_phone_has_no_link() {
        let record = LocationRecord {
            name: "Center".to_string(),
            ..Default::default()
        };
        assert!(!popup_html(&record).contains("tel:"));
    }
}
