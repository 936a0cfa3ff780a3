//! Customer — a named, addressed party identified by a unique email.

use serde::Serialize;

use crate::id::CustomerId;

/// A customer record.
///
/// `id` stays `None` until the record is persisted; the store assigns it on
/// first save and it never changes afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: Option<CustomerId>,
    pub name: String,
    pub email: String,
    pub address: String,
}

impl Customer {
    /// Create a not-yet-persisted customer.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Attach a store-assigned identifier.
    #[must_use]
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Partial update of a [`Customer`].
///
/// A `None` field is left untouched. `Some(String::new())` is an explicit
/// change to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CustomerPatch {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// `true` when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.address.is_none()
    }

    /// Keep only the fields that would actually change `current`.
    #[must_use]
    pub fn changes_against(self, current: &Customer) -> Self {
        Self {
            name: self.name.filter(|name| *name != current.name),
            email: self.email.filter(|email| *email != current.email),
            address: self.address.filter(|address| *address != current.address),
        }
    }

    /// Write every present field into `customer`.
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(address) = self.address {
            customer.address = address;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smit() -> Customer {
        Customer::new("smit", "smit@gmail.com", "IND").with_id(CustomerId::new(5))
    }

    #[test]
    fn should_create_customer_without_id() {
        let customer = Customer::new("smit", "smit@gmail.com", "IND");
        assert!(customer.id.is_none());
        assert_eq!(customer.name, "smit");
        assert_eq!(customer.email, "smit@gmail.com");
        assert_eq!(customer.address, "IND");
    }

    #[test]
    fn should_serialize_id_as_number() {
        let json = serde_json::to_value(smit()).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["email"], "smit@gmail.com");
    }

    #[test]
    fn should_drop_unchanged_fields_when_computing_changes() {
        let patch = CustomerPatch::default()
            .name("smit")
            .email("smit@bing.com")
            .changes_against(&smit());

        assert_eq!(patch.name, None);
        assert_eq!(patch.email.as_deref(), Some("smit@bing.com"));
        assert_eq!(patch.address, None);
    }

    #[test]
    fn should_keep_empty_string_as_a_change() {
        let patch = CustomerPatch::default().address("").changes_against(&smit());
        assert_eq!(patch.address.as_deref(), Some(""));
        assert!(!patch.is_empty());
    }

    #[test]
    fn should_be_empty_when_every_field_matches() {
        let patch = CustomerPatch::default()
            .name("smit")
            .email("smit@gmail.com")
            .address("IND")
            .changes_against(&smit());
        assert!(patch.is_empty());
    }

    #[test]
    fn should_only_touch_present_fields_when_applied() {
        let mut customer = smit();
        CustomerPatch::default().address("UK").apply_to(&mut customer);

        assert_eq!(customer.name, "smit");
        assert_eq!(customer.email, "smit@gmail.com");
        assert_eq!(customer.address, "UK");
        assert_eq!(customer.id, Some(CustomerId::new(5)));
    }
}
