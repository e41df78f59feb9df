//! Company lookup used to fill the form's company choices.

use crate::model::company::Company;
use crate::repo::{parse_uuid, RepoResult};
use rusqlite::{params, Connection};

/// Read/write access to the company reference list.
pub trait CompanyRepository {
    /// Returns all companies sorted by name.
    fn find_all_companies(&self) -> RepoResult<Vec<Company>>;
    /// Inserts the company, or renames it when its id already exists.
    fn save_company(&self, company: &Company) -> RepoResult<()>;
}

/// SQLite-backed company repository.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn find_all_companies(&self) -> RepoResult<Vec<Company>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, name FROM companies ORDER BY name ASC, id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            companies.push(Company {
                id: parse_uuid(&uuid_text, "companies.uuid")?,
                name: row.get("name")?,
            });
        }
        Ok(companies)
    }

    fn save_company(&self, company: &Company) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO companies (uuid, name) VALUES (?1, ?2)
             ON CONFLICT (uuid) DO UPDATE SET name = excluded.name;",
            params![company.id.to_string(), company.name.as_str()],
        )?;
        Ok(())
    }
}
