use infoco_core::{Collection, DomainError, DomainResult, RecordRules};
use infoco_records::Named;

pub const DEPARTMENTS: [&str; 8] = [
    "Administrativo",
    "Financeiro",
    "Recursos Humanos",
    "Tecnologia",
    "Jurídico",
    "Técnico",
    "Suporte",
    "SEO",
];

infoco_core::record! {
    pub struct Employee / EmployeeDraft in Collection::Employees {
        req name: String,
        req position: String,
        req department: String,
        req email: String,
        opt base_salary: Option<f64>,
    }
}

impl RecordRules for Employee {
    fn normalize(&mut self) {
        self.email = self.email.trim().to_string();
    }

    fn validate(&self) -> DomainResult<()> {
        if !self.email.contains('@') {
            return Err(DomainError::invalid_field("email"));
        }
        if let Some(salary) = self.base_salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err(DomainError::invalid_field("base_salary"));
            }
        }
        Ok(())
    }
}

impl Named for Employee {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Employee {
    /// Salary usable for payroll: present and non-zero.
    pub fn payable_salary(&self) -> Option<f64> {
        self.base_salary.filter(|s| *s > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use infoco_core::{Draft, RecordId};

    use super::*;

    #[test]
    fn salary_is_optional_but_never_negative() {
        let draft = EmployeeDraft {
            name: Some("Ana Costa".into()),
            position: Some("Analista Financeiro".into()),
            department: Some("Financeiro".into()),
            email: Some("ana.costa@infoco.com".into()),
            ..Default::default()
        };
        let mut e = draft.into_record(RecordId::new(4)).unwrap();
        assert!(e.validate().is_ok());
        assert_eq!(e.payable_salary(), None);

        e.base_salary = Some(-1.0);
        assert_eq!(e.validate(), Err(DomainError::invalid_field("base_salary")));
    }
}
