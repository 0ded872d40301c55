//! Municipal contracts and the payables/receivables ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use infoco_core::{Collection, DomainError, DomainResult, RecordRules};
use infoco_records::Named;

use crate::uploads;

infoco_core::record! {
    /// A client municipality: contract amounts and end date.
    pub struct Municipality / MunicipalityDraft in Collection::Municipalities {
        req municipality: String,
        req paid: f64,
        req pending: f64,
        req contract_end_date: NaiveDate,
        opt coat_of_arms_url: Option<String>,
    }
}

impl RecordRules for Municipality {
    fn normalize(&mut self) {
        self.municipality = self.municipality.trim().to_uppercase();
    }

    fn validate(&self) -> DomainResult<()> {
        if self.paid < 0.0 {
            return Err(DomainError::invalid_field("paid"));
        }
        if self.pending < 0.0 {
            return Err(DomainError::invalid_field("pending"));
        }
        if let Some(image) = &self.coat_of_arms_url {
            uploads::ensure_image("coat_of_arms_url", image)?;
        }
        Ok(())
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.municipality.clone())
    }
}

impl Named for Municipality {
    fn display_name(&self) -> &str {
        &self.municipality
    }
}

labelled_enum! {
    pub enum TransactionType {
        Receivable => "receivable",
        Payable => "payable",
    }
}

labelled_enum! {
    pub enum TransactionStatus {
        Pending => "pending",
        Paid => "paid",
    }
}

infoco_core::record! {
    pub struct Transaction / TransactionDraft in Collection::Transactions {
        req description: String,
        req #[serde(rename = "type")] kind: TransactionType,
        req amount: f64,
        req due_date: NaiveDate,
        req status: TransactionStatus,
        opt payment_date: Option<NaiveDate>,
        opt municipality_id: Option<infoco_core::RecordId>,
    }
    defaults {
        kind: Some(TransactionType::Receivable),
        status: Some(TransactionStatus::Pending)
    }
}

impl RecordRules for Transaction {
    fn validate(&self) -> DomainResult<()> {
        if self.amount < 0.0 {
            return Err(DomainError::invalid_field("amount"));
        }
        Ok(())
    }
}

/// Totals shown on the finance tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_paid: f64,
    pub total_pending: f64,
    pub pending_receivable: f64,
    pub pending_payable: f64,
    pub paid_receivable: f64,
    pub paid_payable: f64,
}

impl FinanceSummary {
    pub fn compute(municipalities: &[Municipality], transactions: &[Transaction]) -> Self {
        let mut summary = FinanceSummary {
            total_paid: municipalities.iter().map(|m| m.paid).sum(),
            total_pending: municipalities.iter().map(|m| m.pending).sum(),
            ..Default::default()
        };
        for t in transactions {
            let slot = match (t.kind, t.status) {
                (TransactionType::Receivable, TransactionStatus::Pending) => &mut summary.pending_receivable,
                (TransactionType::Payable, TransactionStatus::Pending) => &mut summary.pending_payable,
                (TransactionType::Receivable, TransactionStatus::Paid) => &mut summary.paid_receivable,
                (TransactionType::Payable, TransactionStatus::Paid) => &mut summary.paid_payable,
            };
            *slot += t.amount;
        }
        summary
    }

    /// Pending receivables minus pending payables.
    pub fn projected_balance(&self) -> f64 {
        self.pending_receivable - self.pending_payable
    }
}

#[cfg(test)]
mod tests {
    use infoco_core::{Draft, RecordId};
    use infoco_records::EntityStore;

    use super::*;

    fn municipality(name: &str, paid: f64, pending: f64) -> MunicipalityDraft {
        MunicipalityDraft {
            municipality: Some(name.into()),
            paid: Some(paid),
            pending: Some(pending),
            contract_end_date: NaiveDate::from_ymd_opt(2025, 12, 31),
            ..Default::default()
        }
    }

    #[test]
    fn names_are_stored_upper_case_and_unique() {
        let mut store: EntityStore<Municipality> = EntityStore::new();
        let id = store.table().submit(municipality(" Palmas ", 10.0, 5.0)).unwrap().id();
        assert_eq!(store.get(id).unwrap().municipality, "PALMAS");

        let err = store.table().submit(municipality("palmas", 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn transaction_kind_is_serialized_as_type() {
        let t = TransactionDraft {
            description: Some("Contrato".into()),
            amount: Some(100.0),
            due_date: NaiveDate::from_ymd_opt(2025, 8, 10),
            ..new_transaction()
        }
        .into_record(RecordId::new(1))
        .unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "receivable");
        assert_eq!(json["status"], "pending");
        assert!(json.get("kind").is_none());
    }

    fn new_transaction() -> TransactionDraft {
        <Transaction as infoco_core::Record>::new_draft()
    }

    #[test]
    fn summary_groups_transactions_by_type_and_status() {
        let m = vec![
            municipality("A", 100.0, 50.0).into_record(RecordId::new(1)).unwrap(),
            municipality("B", 20.0, 0.0).into_record(RecordId::new(2)).unwrap(),
        ];
        let tx = |id, kind, status, amount| Transaction {
            id: RecordId::new(id),
            description: "x".into(),
            kind,
            amount,
            due_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            status,
            payment_date: None,
            municipality_id: None,
        };
        let t = vec![
            tx(1, TransactionType::Receivable, TransactionStatus::Pending, 300.0),
            tx(2, TransactionType::Payable, TransactionStatus::Pending, 120.0),
            tx(3, TransactionType::Payable, TransactionStatus::Paid, 80.0),
        ];

        let s = FinanceSummary::compute(&m, &t);
        assert_eq!(s.total_paid, 120.0);
        assert_eq!(s.total_pending, 50.0);
        assert_eq!(s.pending_receivable, 300.0);
        assert_eq!(s.pending_payable, 120.0);
        assert_eq!(s.paid_payable, 80.0);
        assert_eq!(s.projected_balance(), 180.0);
    }
}
