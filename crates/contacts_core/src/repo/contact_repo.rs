//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four operations the main view depends on.
//! - Keep the fragment search inside the persistence layer.
//!
//! # Invariants
//! - Fragment search matches first OR last name, case-insensitively, using
//!   the `*_key` columns written on every save.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::company::Company;
use crate::model::contact::{new_contact_id, search_key, Contact, ContactStatus};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};

const CONTACT_SELECT_SQL: &str = "SELECT
    c.uuid AS uuid,
    c.first_name AS first_name,
    c.last_name AS last_name,
    c.email AS email,
    c.status AS status,
    co.uuid AS company_uuid,
    co.name AS company_name
FROM contacts c
JOIN companies co ON co.uuid = c.company_uuid";

/// Persistence boundary used by the main view.
pub trait ContactRepository {
    /// Returns every contact in insertion order.
    fn find_all(&self) -> RepoResult<Vec<Contact>>;
    /// Returns contacts whose first or last name contains `fragment`,
    /// ignoring case, in insertion order.
    fn find_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Contact>>;
    /// Inserts a transient contact or updates a persisted one.
    ///
    /// Returns the stored contact, carrying its (possibly new) identifier.
    fn save(&self, contact: &Contact) -> RepoResult<Contact>;
    /// Removes a persisted contact. Transient or already-removed contacts
    /// are ignored.
    fn delete(&self, contact: &Contact) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_contacts(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Contact>> {
        self.query_contacts(&format!("{CONTACT_SELECT_SQL} ORDER BY c.id ASC;"), [])
    }

    fn find_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Contact>> {
        self.query_contacts(
            &format!(
                "{CONTACT_SELECT_SQL}
                 WHERE instr(c.first_name_key, ?1) > 0
                    OR instr(c.last_name_key, ?1) > 0
                 ORDER BY c.id ASC;"
            ),
            [search_key(fragment)],
        )
    }

    fn save(&self, contact: &Contact) -> RepoResult<Contact> {
        contact.validate()?;
        let (Some(company), Some(status)) = (&contact.company, contact.status) else {
            return Err(RepoError::InvalidData(
                "validated contact lost its company or status".to_string(),
            ));
        };

        let mut stored = contact.clone();
        match contact.id {
            None => {
                let id = new_contact_id();
                self.conn.execute(
                    "INSERT INTO contacts (
                        uuid,
                        first_name,
                        last_name,
                        email,
                        company_uuid,
                        status,
                        first_name_key,
                        last_name_key
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                    params![
                        id.to_string(),
                        contact.first_name.as_str(),
                        contact.last_name.as_str(),
                        contact.email.as_str(),
                        company.id.to_string(),
                        status.as_key(),
                        search_key(&contact.first_name),
                        search_key(&contact.last_name),
                    ],
                )?;
                stored.id = Some(id);
                debug!("event=contact_save module=repo status=ok op=insert");
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE contacts
                     SET
                        first_name = ?1,
                        last_name = ?2,
                        email = ?3,
                        company_uuid = ?4,
                        status = ?5,
                        first_name_key = ?6,
                        last_name_key = ?7
                     WHERE uuid = ?8;",
                    params![
                        contact.first_name.as_str(),
                        contact.last_name.as_str(),
                        contact.email.as_str(),
                        company.id.to_string(),
                        status.as_key(),
                        search_key(&contact.first_name),
                        search_key(&contact.last_name),
                        id.to_string(),
                    ],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound(id));
                }
                debug!("event=contact_save module=repo status=ok op=update");
            }
        }

        Ok(stored)
    }

    fn delete(&self, contact: &Contact) -> RepoResult<()> {
        let Some(id) = contact.id else {
            return Ok(());
        };
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE uuid = ?1;", [id.to_string()])?;
        debug!("event=contact_delete module=repo status=ok rows={changed}");
        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let uuid_text: String = row.get("uuid")?;
    let company_uuid_text: String = row.get("company_uuid")?;

    let status_text: String = row.get("status")?;
    let status = ContactStatus::from_key(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid contact status `{status_text}` in contacts.status"
        ))
    })?;

    Ok(Contact {
        id: Some(parse_uuid(&uuid_text, "contacts.uuid")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        company: Some(Company {
            id: parse_uuid(&company_uuid_text, "companies.uuid")?,
            name: row.get("company_name")?,
        }),
        status: Some(status),
    })
}
