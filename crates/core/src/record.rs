//! Record contract: identity, edit buffers and submit-time validation.
//!
//! Every business collection is a list of records that carry a numeric id
//! unique within the collection. Forms never hold authoritative copies; they
//! hold a [`Draft`] (every field optional) that is merged and validated only
//! when submitted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::DomainResult;
use crate::id::RecordId;

/// A persisted entity with a stable id.
pub trait Record:
    RecordRules + Clone + core::fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Partial, possibly invalid edit buffer for this record.
    type Draft: Draft<Record = Self>;

    /// Collection this record lives in.
    const COLLECTION: Collection;

    fn id(&self) -> RecordId;

    /// Draft seeded from this record (used by "edit").
    fn to_draft(&self) -> Self::Draft;

    /// Empty or partially defaulted draft (used by "add").
    fn new_draft() -> Self::Draft;
}

/// Edit buffer for a [`Record`].
pub trait Draft:
    Clone + Default + core::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Record: Record;

    /// `None` for a draft that has never been submitted.
    fn id(&self) -> Option<RecordId>;

    /// Required fields that are absent or blank.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Build the record carrying `id`.
    ///
    /// Fails with a validation error listing every missing field; the draft is
    /// consumed either way.
    fn into_record(self, id: RecordId) -> DomainResult<Self::Record>;
}

/// Per-record business rules applied on submit.
pub trait RecordRules: Sized {
    /// New records go to the front of the collection instead of the back.
    const NEWEST_FIRST: bool = false;

    /// Canonicalise fields (case, whitespace) before validation.
    fn normalize(&mut self) {}

    /// Fill system-owned fields of a record about to be created.
    fn on_insert(&mut self) {}

    /// Field-level checks beyond presence.
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }

    /// Key that must be unique across the collection (compared as given).
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Combine the stored record with an edited one before it is written.
    fn merge_update(previous: &Self, next: Self) -> Self {
        let _ = previous;
        next
    }
}

/// Presence check for required draft fields.
pub trait Required {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Required for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Required for RecordId {
    fn is_blank(&self) -> bool {
        self.get() == 0
    }
}

impl Required for f64 {
    fn is_blank(&self) -> bool {
        !self.is_finite()
    }
}

impl Required for u32 {}
impl Required for i64 {}
impl Required for bool {}
impl Required for NaiveDate {}
impl Required for DateTime<Utc> {}

/// Declare a record type together with its draft.
///
/// `req` fields must be present (and not blank) on submit; `opt` fields keep
/// their own type in the draft and fall back to `Default` when absent.
/// An optional `defaults { .. }` block pre-fills drafts handed out for "add".
///
/// ```ignore
/// record! {
///     pub struct Supplier / SupplierDraft in Collection::Suppliers {
///         req name: String,
///         opt phone: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident / $draft:ident in $collection:path {
            $( req $(#[$rmeta:meta])* $rfield:ident : $rty:ty, )*
            $( opt $(#[$ometa:meta])* $ofield:ident : $oty:ty, )*
        }
        $( defaults { $( $dfield:ident : $dexpr:expr ),* $(,)? } )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        $vis struct $name {
            pub id: $crate::RecordId,
            $( $(#[$rmeta])* pub $rfield: $rty, )*
            $( $(#[$ometa])* #[serde(default)] pub $ofield: $oty, )*
        }

        #[doc = concat!("Edit buffer for [`", stringify!($name), "`].")]
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        $vis struct $draft {
            pub id: Option<$crate::RecordId>,
            $( $(#[$rmeta])* pub $rfield: Option<$rty>, )*
            $( $(#[$ometa])* pub $ofield: $oty, )*
        }

        impl $crate::Record for $name {
            type Draft = $draft;

            const COLLECTION: $crate::Collection = $collection;

            fn id(&self) -> $crate::RecordId {
                self.id
            }

            fn to_draft(&self) -> $draft {
                $draft {
                    id: Some(self.id),
                    $( $rfield: Some(::core::clone::Clone::clone(&self.$rfield)), )*
                    $( $ofield: ::core::clone::Clone::clone(&self.$ofield), )*
                }
            }

            #[allow(clippy::needless_update)]
            fn new_draft() -> $draft {
                $draft {
                    $( $( $dfield: $dexpr, )* )?
                    ..::core::default::Default::default()
                }
            }
        }

        impl $crate::Draft for $draft {
            type Record = $name;

            fn id(&self) -> Option<$crate::RecordId> {
                self.id
            }

            fn missing_fields(&self) -> Vec<&'static str> {
                #[allow(unused_mut)]
                let mut missing = Vec::new();
                $(
                    if self.$rfield.as_ref().map_or(true, $crate::Required::is_blank) {
                        missing.push(stringify!($rfield));
                    }
                )*
                missing
            }

            fn into_record(self, id: $crate::RecordId) -> $crate::DomainResult<$name> {
                let missing = $crate::Draft::missing_fields(&self);
                if !missing.is_empty() {
                    return Err($crate::DomainError::validation(missing));
                }
                $(
                    let Some($rfield) = self.$rfield else {
                        return Err($crate::DomainError::invalid_field(stringify!($rfield)));
                    };
                )*
                Ok($name {
                    id,
                    $( $rfield, )*
                    $( $ofield: self.$ofield, )*
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Collection, DomainError, Draft, Record, RecordId, RecordRules};

    crate::record! {
        /// Minimal record used to exercise the macro.
        pub struct Note / NoteDraft in Collection::Suppliers {
            req title: String,
            req hours: f64,
            opt tag: Option<String>,
            opt lines: Vec<String>,
        }
        defaults { hours: Some(1.0) }
    }

    impl RecordRules for Note {}

    #[test]
    fn new_draft_applies_defaults() {
        let draft = Note::new_draft();
        assert_eq!(draft.id, None);
        assert_eq!(draft.hours, Some(1.0));
        assert_eq!(draft.title, None);
    }

    #[test]
    fn missing_fields_are_enumerated() {
        let draft = NoteDraft::default();
        assert_eq!(draft.missing_fields(), vec!["title", "hours"]);

        let err = draft.into_record(RecordId::new(1)).unwrap_err();
        assert_eq!(err, DomainError::validation(vec!["title", "hours"]));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let draft = NoteDraft {
            title: Some("   ".to_string()),
            hours: Some(2.0),
            ..Default::default()
        };
        assert_eq!(draft.missing_fields(), vec!["title"]);
    }

    #[test]
    fn draft_round_trips_through_record() {
        let note = Note {
            id: RecordId::new(9),
            title: "Relatório".to_string(),
            hours: 7.5,
            tag: Some("mensal".to_string()),
            lines: vec!["a".to_string()],
        };

        let rebuilt = note.to_draft().into_record(RecordId::new(9)).unwrap();
        assert_eq!(rebuilt, note);
    }

    #[test]
    fn serializes_with_camel_case_keys_and_tolerates_missing_optionals() {
        let json = serde_json::json!({ "id": 3, "title": "x", "hours": 1.0 });
        let note: Note = serde_json::from_value(json).unwrap();
        assert_eq!(note.tag, None);
        assert!(note.lines.is_empty());
        assert_eq!(Note::COLLECTION, Collection::Suppliers);
    }
}
