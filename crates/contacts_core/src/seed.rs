//! Demo data for empty databases.

use crate::model::company::Company;
use crate::model::contact::{Contact, ContactStatus};
use crate::repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
use crate::repo::contact_repo::{ContactRepository, SqliteContactRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;

const DEMO_COMPANIES: &[&str] = &["Northwind Traders", "Globex", "Initech"];

// (first name, last name, company index, status)
const DEMO_CONTACTS: &[(&str, &str, usize, ContactStatus)] = &[
    ("Anna", "Smith", 0, ContactStatus::Customer),
    ("Dan", "Brown", 1, ContactStatus::Contacted),
    ("Eula", "Lane", 2, ContactStatus::ImportedLead),
    ("Barry", "Rodriquez", 0, ContactStatus::NotContacted),
    ("Eileen", "Walker", 1, ContactStatus::ClosedLost),
    ("Jonas", "Åberg", 2, ContactStatus::Customer),
];

/// Inserts demo companies and contacts unless contacts already exist.
///
/// Returns the number of contacts inserted.
pub fn seed_demo_data(conn: &Connection) -> RepoResult<usize> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
    if existing > 0 {
        info!("event=seed module=seed status=skipped existing={existing}");
        return Ok(0);
    }

    let tx = conn.unchecked_transaction()?;
    let company_repo = SqliteCompanyRepository::new(&tx);
    let contact_repo = SqliteContactRepository::new(&tx);

    let companies = DEMO_COMPANIES
        .iter()
        .map(|name| Company::new(*name))
        .collect::<Vec<_>>();
    for company in &companies {
        company_repo.save_company(company)?;
    }

    for (first_name, last_name, company_index, status) in DEMO_CONTACTS {
        let contact = Contact {
            id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: demo_email(first_name, last_name),
            company: Some(companies[*company_index].clone()),
            status: Some(*status),
        };
        contact_repo.save(&contact)?;
    }
    tx.commit()?;

    info!(
        "event=seed module=seed status=ok companies={} contacts={}",
        companies.len(),
        DEMO_CONTACTS.len()
    );
    Ok(DEMO_CONTACTS.len())
}

fn demo_email(first_name: &str, last_name: &str) -> String {
    let local = format!("{first_name}.{last_name}")
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '.')
        .collect::<String>();
    format!("{local}@example.com")
}
