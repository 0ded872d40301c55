//! Default data written when a key has never been stored.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use infoco_auth::{CredentialRecord, Role};
use infoco_business::{
    Asset, AssetStatus, EmployeeExpense, Employee, ExpenseType, ExternalSystem, InternalExpense,
    InternalExpenseCategory, LeaveRequest, LeaveStatus, LeaveType, MaintenanceRecord, Municipality,
    MonthYear, Notification, NotificationKind, PaymentStatus, PayrollRecord, Supplier, Task,
    TaskStatus, Transaction, TransactionStatus, TransactionType, UpdatePost,
};
use infoco_core::RecordId;

fn id(n: u64) -> RecordId {
    RecordId::new(n)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn month(y: i32, m: u32) -> MonthYear {
    MonthYear::new(y, m).unwrap_or_else(MonthYear::current)
}

fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

pub fn accounts() -> Vec<CredentialRecord> {
    let account = |n, email: &str, password: &str, name: &str, role, department: &str| CredentialRecord {
        id: id(n),
        email: email.into(),
        display_name: name.into(),
        role,
        department: department.into(),
        password: password.into(),
    };
    vec![
        account(101, "admin@infoco.com", "admin123", "Administrador Sistema", Role::Admin, "Administrativo"),
        account(102, "fernando@infoco.com", "fernando123", "Fernando Luiz", Role::Coordinator, "Técnico"),
        account(103, "wendel@gmail.com", "wendel123", "Wendel Infoco", Role::Support, "Suporte"),
        account(104, "uilber@gmail.com", "uilber123", "Uilber Aragão", Role::Director, "SEO"),
    ]
}

pub fn update_posts(now: DateTime<Utc>) -> Vec<UpdatePost> {
    vec![
        UpdatePost {
            id: id(1),
            author_id: id(101),
            content: "Bem-vindo ao novo feed de **Notas de Atualização**! 🎉\n\n- Agora você pode ver todas as novidades e melhorias do sistema diretamente aqui.\n- Fique atento para mais atualizações em breve!".into(),
            created_at: days_ago(now, 1),
        },
        UpdatePost {
            id: id(2),
            author_id: id(101),
            content: "Implementamos o módulo completo de *Gerenciamento de Usuários*. Administradores agora podem adicionar, editar e remover usuários do sistema na nova aba 'Usuários'.".into(),
            created_at: days_ago(now, 3),
        },
    ]
}

pub fn employees() -> Vec<Employee> {
    let employee = |n, name: &str, position: &str, department: &str, email: &str, salary| Employee {
        id: id(n),
        name: name.into(),
        position: position.into(),
        department: department.into(),
        email: email.into(),
        base_salary: Some(salary),
    };
    vec![
        employee(1, "Fernando Luiz", "Coordenador Operacional", "Técnico", "fernando@infoco.com", 7500.0),
        employee(2, "Wendel Infoco", "Suporte Técnico", "Suporte", "wendel@gmail.com", 4500.0),
        employee(3, "Uilber Aragão", "Diretor Executivo", "SEO", "uilber@gmail.com", 15000.0),
        employee(4, "Ana Costa", "Analista Financeiro", "Financeiro", "ana.costa@infoco.com", 6000.0),
        employee(5, "Carlos Silva", "Advogado", "Jurídico", "carlos.silva@infoco.com", 8000.0),
    ]
}

pub fn tasks() -> Vec<Task> {
    let task = |n, employee, title: &str, description: &str, day, hours, status| Task {
        id: id(n),
        employee_id: id(employee),
        title: title.into(),
        description: description.into(),
        date: date(2025, 7, day),
        hours,
        status,
    };
    vec![
        task(1, 1, "Análise de ARPs e Contratos", "Revisar e analisar processos administrativos pendentes", 8, 8.0, TaskStatus::Completed),
        task(2, 2, "Suporte Sistema", "Atendimento a chamados técnicos do sistema", 9, 6.0, TaskStatus::InProgress),
        task(3, 3, "Verificação de Processos Internos", "Direção da Infoco", 9, 4.0, TaskStatus::Pending),
        task(4, 4, "Relatório de Fechamento Mensal", "Compilar dados financeiros para o relatório de Junho.", 10, 7.5, TaskStatus::InProgress),
        task(5, 5, "Análise de Contrato - Cliente X", "Revisar cláusulas do novo contrato com o Cliente X.", 15, 5.0, TaskStatus::Pending),
    ]
}

pub fn municipalities() -> Vec<Municipality> {
    let m = |n, name: &str, paid, pending, end| Municipality {
        id: id(n),
        municipality: name.into(),
        paid,
        pending,
        contract_end_date: end,
        coat_of_arms_url: None,
    };
    vec![
        m(1, "ALMADINA", 150_000.0, 25_000.0, date(2025, 7, 31)),
        m(2, "NOVA VIÇOSA", 120_000.0, 45_000.0, date(2025, 8, 15)),
        m(3, "CACULÉ", 95_000.0, 10_000.0, date(2025, 7, 26)),
        m(4, "MASCOTE", 80_000.0, 30_000.0, date(2025, 9, 1)),
        m(5, "ITAQUARA", 180_000.0, 5_000.0, date(2025, 7, 8)),
        m(6, "TEIXEIRA DE FREITAS", 110_000.0, 12_000.0, date(2025, 10, 20)),
    ]
}

pub fn employee_expenses() -> Vec<EmployeeExpense> {
    let e = |n, employee, kind, description: &str, amount, day, status, receipt: Option<&str>| EmployeeExpense {
        id: id(n),
        employee_id: id(employee),
        description: description.into(),
        kind,
        amount,
        date: date(2025, 7, day),
        status,
        receipt: receipt.map(Into::into),
    };
    vec![
        e(1, 1, ExpenseType::Travel, "Visita ao cliente em Nova Viçosa", 350.75, 5, PaymentStatus::Paid, Some("nf-viagem-001.pdf")),
        e(2, 2, ExpenseType::Voucher, "Adiantamento quinzenal", 500.0, 15, PaymentStatus::Pending, None),
        e(3, 4, ExpenseType::Reimbursement, "Compra de material de escritório", 89.90, 2, PaymentStatus::Paid, Some("recibo-papelaria.jpg")),
        e(4, 1, ExpenseType::Voucher, "Adiantamento quinzenal", 600.0, 15, PaymentStatus::Paid, None),
    ]
}

pub fn internal_expenses() -> Vec<InternalExpense> {
    let e = |n, description: &str, category, amount, day, supplier: Option<u64>| InternalExpense {
        id: id(n),
        description: description.into(),
        category,
        amount,
        date: date(2025, 7, day),
        supplier_id: supplier.map(id),
    };
    vec![
        e(1, "Compra de 50 resmas de papel A4", InternalExpenseCategory::OfficeSupplies, 1250.0, 1, Some(1)),
        e(2, "Conta de energia elétrica - Sede", InternalExpenseCategory::FixedBills, 850.55, 5, None),
        e(3, "Manutenção do ar condicionado central", InternalExpenseCategory::Maintenance, 450.0, 10, Some(2)),
        e(4, "Campanha de marketing digital - Julho", InternalExpenseCategory::Marketing, 2500.0, 12, Some(3)),
    ]
}

pub fn assets() -> Vec<Asset> {
    vec![
        Asset {
            id: id(1),
            name: "Notebook Dell Inspiron 15".into(),
            description: "Core i7, 16GB RAM, 512GB SSD".into(),
            purchase_date: date(2024, 1, 15),
            purchase_value: 5500.0,
            location: "Sala da Diretoria".into(),
            status: AssetStatus::InUse,
            assigned_to_employee_id: Some(id(3)),
            maintenance_log: Vec::new(),
        },
        Asset {
            id: id(2),
            name: "Impressora HP LaserJet Pro".into(),
            description: "Modelo M404dn, Rede".into(),
            purchase_date: date(2023, 11, 20),
            purchase_value: 1800.0,
            location: "Recepção".into(),
            status: AssetStatus::InUse,
            assigned_to_employee_id: None,
            maintenance_log: Vec::new(),
        },
        Asset {
            id: id(3),
            name: "Cadeira de Escritório Presidente".into(),
            description: "Marca Flexform, cor preta".into(),
            purchase_date: date(2024, 2, 10),
            purchase_value: 950.0,
            location: "Sala do Financeiro".into(),
            status: AssetStatus::UnderMaintenance,
            assigned_to_employee_id: Some(id(4)),
            maintenance_log: vec![MaintenanceRecord {
                id: id(1),
                date: date(2025, 7, 5),
                description: "Troca do pistão a gás".into(),
                cost: 120.0,
            }],
        },
    ]
}

/// Newest first.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: id(3),
            kind: NotificationKind::System,
            title: "Tarefa Pendente".into(),
            description: "A tarefa \"Relatório de Fechamento Mensal\" ainda está em andamento.".into(),
            date: days_ago(now, 1),
            event_date: None,
            read: false,
            link: Some("tasks".into()),
        },
        Notification {
            id: id(1),
            kind: NotificationKind::System,
            title: "Vencimento de Contrato".into(),
            description: "O contrato com o município de ALMADINA vence em breve.".into(),
            date: days_ago(now, 2),
            event_date: Some(date(2025, 7, 31)),
            read: false,
            link: Some("municipalities".into()),
        },
        Notification {
            id: id(2),
            kind: NotificationKind::Reminder,
            title: "Lembrete Pessoal".into(),
            description: "Preparar apresentação para a reunião de sexta-feira.".into(),
            date: days_ago(now, 5),
            event_date: Some(date(2025, 7, 11)),
            read: true,
            link: Some("tasks".into()),
        },
    ]
}

pub fn suppliers() -> Vec<Supplier> {
    let s = |n, name: &str, category: &str, contact: &str, email: &str, phone: &str| Supplier {
        id: id(n),
        name: name.into(),
        category: category.into(),
        contact_person: contact.into(),
        email: email.into(),
        phone: phone.into(),
    };
    vec![
        s(1, "Papelaria Central", "Material de Escritório", "João Mendes", "contato@papelariacentral.com", "(71) 3333-4444"),
        s(2, "Refrigeração Polar", "Manutenção", "Mariana Lima", "suporte@refrigeracaopolar.com", "(71) 98877-6655"),
        s(3, "Agência Digital Vibe", "Marketing", "Felipe Souza", "felipe@vibe.com", "(11) 91234-5678"),
    ]
}

pub fn transactions() -> Vec<Transaction> {
    use TransactionStatus::{Paid, Pending};
    use TransactionType::{Payable, Receivable};

    let t = |n, kind, description: &str, amount, due, paid_on: Option<NaiveDate>, status, municipality: Option<u64>| Transaction {
        id: id(n),
        description: description.into(),
        kind,
        amount,
        due_date: due,
        status,
        payment_date: paid_on,
        municipality_id: municipality.map(id),
    };
    vec![
        t(1, Receivable, "Recebimento NF #123 - ALMADINA", 75_000.0, date(2025, 7, 10), Some(date(2025, 7, 9)), Paid, Some(1)),
        t(2, Receivable, "Recebimento NF #124 - NOVA VIÇOSA", 60_000.0, date(2025, 7, 15), None, Pending, Some(2)),
        t(3, Payable, "Pagamento Aluguel Escritório", 4_500.0, date(2025, 7, 5), Some(date(2025, 7, 5)), Paid, None),
        t(4, Payable, "Pagamento Fornecedor Papelaria Central", 1_250.0, date(2025, 7, 20), None, Pending, None),
    ]
}

/// Historical records; their amounts predate the current payroll rates.
pub fn payrolls() -> Vec<PayrollRecord> {
    let p = |n, employee, base, benefits, deductions, net| PayrollRecord {
        id: id(n),
        employee_id: id(employee),
        month_year: month(2025, 6),
        base_salary: base,
        benefits,
        deductions,
        net_pay: net,
        pay_date: date(2025, 7, 5),
    };
    vec![
        p(1, 4, 6000.0, 800.0, 650.0, 6150.0),
        p(2, 1, 7500.0, 1200.0, 980.0, 7720.0),
    ]
}

pub fn leave_requests() -> Vec<LeaveRequest> {
    vec![
        LeaveRequest {
            id: id(1),
            employee_id: id(2),
            kind: LeaveType::Vacation,
            start_date: date(2025, 8, 1),
            end_date: date(2025, 8, 15),
            reason: "Férias anuais programadas".into(),
            status: LeaveStatus::Approved,
        },
        LeaveRequest {
            id: id(2),
            employee_id: id(5),
            kind: LeaveType::MedicalLeave,
            start_date: date(2025, 7, 20),
            end_date: date(2025, 7, 22),
            reason: "Consulta médica".into(),
            status: LeaveStatus::Pending,
        },
    ]
}

pub fn external_systems() -> Vec<ExternalSystem> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use infoco_core::RecordRules;

    use super::*;

    fn all_valid<T: RecordRules>(records: &[T]) -> bool {
        records.iter().all(|r| r.validate().is_ok())
    }

    #[test]
    fn seed_records_pass_their_own_rules() {
        let now = Utc::now();
        assert!(all_valid(&accounts()));
        assert!(all_valid(&employees()));
        assert!(all_valid(&tasks()));
        assert!(all_valid(&municipalities()));
        assert!(all_valid(&employee_expenses()));
        assert!(all_valid(&internal_expenses()));
        assert!(all_valid(&assets()));
        assert!(all_valid(&notifications(now)));
        assert!(all_valid(&suppliers()));
        assert!(all_valid(&transactions()));
        assert!(all_valid(&payrolls()));
        assert!(all_valid(&leave_requests()));
        assert!(all_valid(&update_posts(now)));
    }

    #[test]
    fn notifications_are_stored_newest_first() {
        let list = notifications(Utc::now());
        assert!(list.windows(2).all(|w| w[0].date >= w[1].date));
    }
}
