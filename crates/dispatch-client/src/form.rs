//! Input fields of the order form, read by identifier.

use crate::model::OrderFields;
use std::collections::HashMap;
use std::sync::RwLock;

pub const FARMER_ID_FIELD: &str = "farmer_id";
pub const CROP_TYPE_FIELD: &str = "crop_type";
pub const QUANTITY_FIELD: &str = "quantity";

/// The host page's form. A field that does not exist reads as an empty string.
pub trait InputSurface: Send + Sync {
    fn value_of(&self, field_id: &str) -> String;
}

/// Reads the three order fields as typed; no trimming or validation.
pub fn read_order_fields(surface: &dyn InputSurface) -> OrderFields {
    OrderFields {
        farmer_id: surface.value_of(FARMER_ID_FIELD),
        crop_type: surface.value_of(CROP_TYPE_FIELD),
        quantity: surface.value_of(QUANTITY_FIELD),
    }
}

/// In-memory form that can be edited between submissions.
#[derive(Debug, Default)]
pub struct FormValues {
    fields: RwLock<HashMap<String, String>>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(farmer_id: &str, crop_type: &str, quantity: &str) -> Self {
        let form = Self::new();
        form.set(FARMER_ID_FIELD, farmer_id);
        form.set(CROP_TYPE_FIELD, crop_type);
        form.set(QUANTITY_FIELD, quantity);
        form
    }

    pub fn set(&self, field_id: &str, value: impl Into<String>) {
        if let Ok(mut fields) = self.fields.write() {
            fields.insert(field_id.to_string(), value.into());
        }
    }
}

impl InputSurface for FormValues {
    fn value_of(&self, field_id: &str) -> String {
        self.fields
            .read()
            .ok()
            .and_then(|fields| fields.get(field_id).cloned())
            .unwrap_or_default()
    }
}
