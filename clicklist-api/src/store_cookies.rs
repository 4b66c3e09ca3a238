//! Store-selection cookies.
//!
//! After authenticating, the storefront expects the browser to carry a set
//! of cookies describing the shopper's pickup store before it will open the
//! online-shopping session. The server never sets them itself; they are
//! derived from the `storeInformation` record of the authenticate response.
//!
//! Values are percent-encoded the way a browser script would encode them
//! (`encodeURIComponent` character set), so addresses containing spaces or
//! commas stay valid cookie octets.

use clicklist_core::StoreInformation;
use clicklist_fetch::CookieJar;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unescaped: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COOKIE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One synthesized cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCookie {
    /// Cookie name.
    pub name: &'static str,
    /// Encoded cookie value.
    pub value: String,
}

impl StoreCookie {
    fn new(name: &'static str, raw: &str) -> Self {
        Self {
            name,
            value: utf8_percent_encode(raw, COOKIE_VALUE).to_string(),
        }
    }
}

/// The full set of store-selection cookies for one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCookies(Vec<StoreCookie>);

impl StoreCookies {
    /// Derives the cookies from a store record.
    ///
    /// The output is a pure function of `info`: same store, same cookies.
    pub fn from_store(info: &StoreInformation) -> Self {
        let address = &info.address;
        let formatted_address = address.formatted();
        let summary = [
            info.division_number.as_str(),
            info.store_number.as_str(),
            info.record_id.as_str(),
            info.local_name.as_str(),
            formatted_address.as_str(),
            info.phone_number.as_str(),
        ]
        .join("|");

        Self(vec![
            StoreCookie::new("StoreCode", &info.store_code()),
            StoreCookie::new("StoreLocalName", &info.local_name),
            StoreCookie::new("StoreAddress", &formatted_address),
            StoreCookie::new("StoreZipCode", &address.zip_code),
            StoreCookie::new("StoreInformation", &summary),
            StoreCookie::new("ECommPickupStoreNumber", &info.store_number),
            StoreCookie::new("ECommPickupDivisionNumber", &info.division_number),
            StoreCookie::new("ECommPickupRecordChange", &info.record_id),
            StoreCookie::new("ECommPickupAddressLine", &address.address_line),
            StoreCookie::new("ECommPickupCity", &address.city),
            StoreCookie::new("ECommPickupState", &address.state),
            StoreCookie::new("ECommPickupZipCode", &address.zip_code),
        ])
    }

    /// Looks up a cookie value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|cookie| cookie.name == name)
            .map(|cookie| cookie.value.as_str())
    }

    /// Iterates the cookies in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &StoreCookie> {
        self.0.iter()
    }

    /// Number of cookies.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a set built by [`from_store`](Self::from_store).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Writes every cookie into `jar` under `domain`.
    pub fn apply(&self, jar: &mut CookieJar, domain: &str) {
        for cookie in &self.0 {
            jar.set(domain, cookie.name, cookie.value.clone());
        }
    }
}
