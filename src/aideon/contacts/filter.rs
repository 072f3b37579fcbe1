use crate::aideon::contacts::model::Contact;

/// A contact is usable when it carries a real email or a real phone number.
pub fn is_valid(contact: &Contact) -> bool {
    contact.has_email() || contact.has_phone()
}

/// Keeps the usable contacts, preserving their relative order.
pub fn filter_valid(contacts: Vec<Contact>) -> Vec<Contact> {
    contacts.into_iter().filter(is_valid).collect()
}
