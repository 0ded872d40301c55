//! Generic collection storage and the table controller
//! every business tab is built on.

pub mod lookup;
pub mod store;
pub mod table;

pub use lookup::{resolve_name, resolve_with, Named, NOT_AVAILABLE, UNKNOWN};
pub use store::EntityStore;
pub use table::{RecordTable, Submitted};

#[cfg(test)]
pub(crate) mod fixtures {
    use infoco_core::{Collection, DomainError, DomainResult, RecordRules};

    infoco_core::record! {
        pub struct Widget / WidgetDraft in Collection::Suppliers {
            req name: String,
            req code: String,
            opt weight: u32,
        }
    }

    impl RecordRules for Widget {
        fn validate(&self) -> DomainResult<()> {
            if self.weight > 1_000 {
                return Err(DomainError::invalid_field("weight"));
            }
            Ok(())
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.code.to_lowercase())
        }
    }

    pub fn draft(name: &str, code: &str) -> WidgetDraft {
        WidgetDraft {
            name: Some(name.to_string()),
            code: Some(code.to_string()),
            ..Default::default()
        }
    }
}
