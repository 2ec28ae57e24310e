//! # Share Links
//!
//! Builds the WhatsApp click-to-chat link that carries the order message.
//!
//! ```text
//! https://wa.me/<digits>?text=<percent-encoded message>
//! ```
//!
//! `<digits>` is the international number with no `+`, spaces or dashes.
//! Everything outside the URL-unreserved set is percent-encoded as UTF-8,
//! so emoji, `*`, `$` and newlines all survive the trip.

use serde::Serialize;

/// Click-to-chat base URL.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// A ready-to-open share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub phone_digits: String,
    pub message: String,
    pub url: String,
}

impl ShareLink {
    pub fn new(phone_digits: String, message: String) -> Self {
        let url = whatsapp_link(&phone_digits, &message);
        ShareLink {
            phone_digits,
            message,
            url,
        }
    }
}

/// `https://wa.me/<phone_digits>?text=<message>`, message percent-encoded.
pub fn whatsapp_link(phone_digits: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        phone_digits,
        urlencoding::encode(message)
    )
}
