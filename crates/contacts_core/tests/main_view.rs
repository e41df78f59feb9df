use contacts_core::db::open_db_in_memory;
use contacts_core::{
    Company, CompanyRepository, Contact, ContactField, ContactRepository, ContactStatus,
    FieldEdit, MainView, NotificationKind, QueryPath, RepoResult, Selection,
    SqliteCompanyRepository, SqliteContactRepository, ViewEvent, ViewOptions,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    FindAll,
    FindByNameFragment(String),
    Save(Contact),
    Delete(Contact),
}

/// Forwards to SQLite and records every call.
struct RecordingRepository<'conn> {
    inner: SqliteContactRepository<'conn>,
    calls: RefCell<Vec<Call>>,
}

impl<'conn> RecordingRepository<'conn> {
    fn new(conn: &'conn Connection) -> Self {
        Self {
            inner: SqliteContactRepository::new(conn),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Save(_) | Call::Delete(_)))
            .collect()
    }
}

impl ContactRepository for RecordingRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Contact>> {
        self.calls.borrow_mut().push(Call::FindAll);
        self.inner.find_all()
    }

    fn find_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Contact>> {
        self.calls
            .borrow_mut()
            .push(Call::FindByNameFragment(fragment.to_string()));
        self.inner.find_by_name_fragment(fragment)
    }

    fn save(&self, contact: &Contact) -> RepoResult<Contact> {
        self.calls.borrow_mut().push(Call::Save(contact.clone()));
        self.inner.save(contact)
    }

    fn delete(&self, contact: &Contact) -> RepoResult<()> {
        self.calls.borrow_mut().push(Call::Delete(contact.clone()));
        self.inner.delete(contact)
    }
}

struct Fixture {
    conn: Connection,
    acme: Company,
    globex: Company,
}

fn fixture() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let acme = Company::new("Acme");
    let globex = Company::new("Globex");
    {
        let companies = SqliteCompanyRepository::new(&conn);
        companies.save_company(&acme).unwrap();
        companies.save_company(&globex).unwrap();

        let contacts = SqliteContactRepository::new(&conn);
        for (first, last, company) in [
            ("Anna", "Smith", &acme),
            ("Dan", "Brown", &globex),
            ("Eileen", "Walker", &acme),
            ("Barry", "Rodriquez", &globex),
        ] {
            contacts
                .save(&Contact {
                    id: None,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: format!("{}@example.com", first.to_lowercase()),
                    company: Some(company.clone()),
                    status: Some(ContactStatus::Contacted),
                })
                .unwrap();
        }
    }
    Fixture { conn, acme, globex }
}

fn open_view(fixture: &Fixture) -> MainView<RecordingRepository<'_>> {
    let companies = SqliteCompanyRepository::new(&fixture.conn)
        .find_all_companies()
        .unwrap();
    MainView::new(
        RecordingRepository::new(&fixture.conn),
        companies,
        ViewOptions::default(),
    )
    .unwrap()
}

fn first_names(view: &MainView<RecordingRepository<'_>>) -> Vec<String> {
    view.grid()
        .rows()
        .iter()
        .map(|contact| contact.first_name.clone())
        .collect()
}

fn row_id(view: &MainView<RecordingRepository<'_>>, first_name: &str) -> contacts_core::ContactId {
    view.grid()
        .rows()
        .iter()
        .find(|contact| contact.first_name == first_name)
        .and_then(|contact| contact.id)
        .unwrap()
}

fn messages(view: &mut MainView<RecordingRepository<'_>>) -> Vec<&'static str> {
    view.take_notifications()
        .into_iter()
        .map(|notification| notification.message)
        .collect()
}

#[test]
fn opening_the_view_lists_every_contact() {
    let fixture = fixture();
    let view = open_view(&fixture);

    assert_eq!(view.repository().calls(), vec![Call::FindAll]);
    assert_eq!(view.last_query_path(), Some(QueryPath::FindAll));
    assert_eq!(first_names(&view), vec!["Anna", "Dan", "Eileen", "Barry"]);
    assert_eq!(*view.selection(), Selection::Empty);
    assert_eq!(
        view.grid().headers(),
        vec!["First name", "Last name", "Email", "Company", "Status"]
    );
}

#[test]
fn blank_filters_request_the_unfiltered_list() {
    let fixture = fixture();
    let mut view = open_view(&fixture);

    for blank in ["   ", "\t", ""] {
        view.repository().clear();
        view.handle(ViewEvent::FilterCommitted(blank.to_string()))
            .unwrap();
        assert_eq!(view.repository().calls(), vec![Call::FindAll]);
        assert_eq!(view.last_query_path(), Some(QueryPath::FindAll));
        assert_eq!(view.grid().rows().len(), 4);
    }
}

#[test]
fn non_blank_filter_matches_first_or_last_name_ignoring_case() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    view.repository().clear();

    view.handle(ViewEvent::FilterCommitted("AN".to_string()))
        .unwrap();

    assert_eq!(
        view.repository().calls(),
        vec![Call::FindByNameFragment("AN".to_string())]
    );
    assert_eq!(view.last_query_path(), Some(QueryPath::FindByNameFragment));
    assert_eq!(first_names(&view), vec!["Anna", "Dan"]);

    view.handle(ViewEvent::FilterCommitted("walk".to_string()))
        .unwrap();
    assert_eq!(first_names(&view), vec!["Eileen"]);
}

#[test]
fn typing_refreshes_the_list_only_after_a_pause() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    view.repository().clear();
    let start = Instant::now();

    for (offset_ms, text) in [(0, "r"), (120, "ro"), (240, "rod")] {
        view.handle(ViewEvent::FilterTyped {
            text: text.to_string(),
            at: start + Duration::from_millis(offset_ms),
        })
        .unwrap();
        view.handle(ViewEvent::Tick(start + Duration::from_millis(offset_ms + 100)))
            .unwrap();
    }
    assert!(view.repository().calls().is_empty());
    assert!(view.filter().is_pending());

    view.handle(ViewEvent::Tick(start + Duration::from_millis(700)))
        .unwrap();
    assert_eq!(
        view.repository().calls(),
        vec![Call::FindByNameFragment("rod".to_string())]
    );
    assert_eq!(first_names(&view), vec!["Barry"]);

    view.handle(ViewEvent::Tick(start + Duration::from_millis(2000)))
        .unwrap();
    assert_eq!(view.repository().calls().len(), 1);
}

#[test]
fn selecting_a_row_populates_the_form_and_deselecting_clears_it() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    let dan_id = row_id(&view, "Dan");

    view.handle(ViewEvent::SelectionChanged(Some(dan_id)))
        .unwrap();

    let form = view.form();
    assert_eq!(form.first_name(), "Dan");
    assert_eq!(form.last_name(), "Brown");
    assert_eq!(form.email(), "dan@example.com");
    assert_eq!(form.company(), Some(&fixture.globex));
    assert_eq!(form.status(), Some(ContactStatus::Contacted));
    assert_eq!(view.grid().selected(), Some(dan_id));
    assert_eq!(
        view.selection().contact().and_then(|contact| contact.id),
        Some(dan_id)
    );

    view.handle(ViewEvent::SelectionChanged(None)).unwrap();
    assert!(view.form().is_empty());
    assert_eq!(*view.selection(), Selection::Empty);
    assert_eq!(view.grid().selected(), None);
}

#[test]
fn selecting_an_id_outside_the_grid_clears_the_form() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    let anna_id = row_id(&view, "Anna");

    view.handle(ViewEvent::SelectionChanged(Some(anna_id)))
        .unwrap();
    view.handle(ViewEvent::SelectionChanged(Some(uuid::Uuid::new_v4())))
        .unwrap();

    assert_eq!(*view.selection(), Selection::Empty);
    assert!(view.form().is_empty());
}

#[test]
fn saving_valid_edits_stores_once_refreshes_and_clears() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    let dan_id = row_id(&view, "Dan");

    view.handle(ViewEvent::SelectionChanged(Some(dan_id)))
        .unwrap();
    view.handle(ViewEvent::FieldEdited(FieldEdit::Email(
        "dan.brown@globex.example".to_string(),
    )))
    .unwrap();
    view.handle(ViewEvent::FieldEdited(FieldEdit::Status(Some(
        ContactStatus::Customer,
    ))))
    .unwrap();
    view.repository().clear();

    view.handle(ViewEvent::Save).unwrap();

    let saves = view.repository().mutations();
    assert_eq!(saves.len(), 1);
    let Call::Save(saved) = &saves[0] else {
        panic!("expected a save call, got {saves:?}");
    };
    assert_eq!(saved.id, Some(dan_id));
    assert_eq!(saved.email, "dan.brown@globex.example");
    assert_eq!(saved.status, Some(ContactStatus::Customer));
    assert_eq!(saved.first_name, "Dan");

    let dan = view.grid().find(dan_id).unwrap();
    assert_eq!(dan.email, "dan.brown@globex.example");
    assert_eq!(
        view.grid().render_row(dan),
        vec!["Dan", "Brown", "dan.brown@globex.example", "Globex", "Customer"]
    );
    assert!(view.form().is_empty());
    assert_eq!(*view.selection(), Selection::Empty);

    let notifications = view.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Contact details stored.");
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(notifications[0].duration, Duration::from_millis(5000));
}

#[test]
fn adding_a_contact_inserts_a_new_row() {
    let fixture = fixture();
    let mut view = open_view(&fixture);

    view.handle(ViewEvent::AddContact).unwrap();
    assert_eq!(*view.selection(), Selection::Editing(Contact::new()));
    assert!(view.form().is_empty());

    for edit in [
        FieldEdit::FirstName("Eula".to_string()),
        FieldEdit::LastName("Lane".to_string()),
        FieldEdit::Email("eula@example.com".to_string()),
        FieldEdit::Company(Some(fixture.acme.id)),
        FieldEdit::Status(Some(ContactStatus::ImportedLead)),
    ] {
        view.handle(ViewEvent::FieldEdited(edit)).unwrap();
    }
    view.handle(ViewEvent::Save).unwrap();

    assert_eq!(first_names(&view), vec!["Anna", "Dan", "Eileen", "Barry", "Eula"]);
    assert!(view.grid().rows()[4].id.is_some());
    assert_eq!(messages(&mut view), vec!["Contact details stored."]);
}

#[test]
fn saving_without_selection_creates_a_contact() {
    let fixture = fixture();
    let mut view = open_view(&fixture);

    for edit in [
        FieldEdit::FirstName("Kim".to_string()),
        FieldEdit::LastName("Hanson".to_string()),
        FieldEdit::Email("kim@example.com".to_string()),
        FieldEdit::Company(Some(fixture.globex.id)),
        FieldEdit::Status(Some(ContactStatus::NotContacted)),
    ] {
        view.handle(ViewEvent::FieldEdited(edit)).unwrap();
    }
    view.handle(ViewEvent::Save).unwrap();

    let saves = view.repository().mutations();
    assert!(matches!(saves.as_slice(), [Call::Save(contact)] if contact.id.is_none()));
    assert_eq!(view.grid().rows().len(), 5);
}

#[test]
fn saving_invalid_input_makes_no_repository_call_and_keeps_state() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    let anna_id = row_id(&view, "Anna");

    view.handle(ViewEvent::SelectionChanged(Some(anna_id)))
        .unwrap();
    let selected_before = view.selection().clone();
    view.handle(ViewEvent::FieldEdited(FieldEdit::Email(
        "anna-at-example".to_string(),
    )))
    .unwrap();
    view.repository().clear();

    view.handle(ViewEvent::Save).unwrap();

    assert!(view.repository().calls().is_empty());
    assert_eq!(*view.selection(), selected_before);
    assert_eq!(view.form().email(), "anna-at-example");
    assert!(view.form().error_for(ContactField::Email).is_some());

    let notifications = view.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Please enter a valid contact details.");
    assert_eq!(notifications[0].kind, NotificationKind::Error);

    view.handle(ViewEvent::FieldEdited(FieldEdit::Email(
        "anna@example.org".to_string(),
    )))
    .unwrap();
    view.handle(ViewEvent::Save).unwrap();
    assert_eq!(view.repository().mutations().len(), 1);
    assert_eq!(messages(&mut view), vec!["Contact details stored."]);
}

#[test]
fn deleting_the_selection_removes_it_once() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    let eileen_id = row_id(&view, "Eileen");

    view.handle(ViewEvent::SelectionChanged(Some(eileen_id)))
        .unwrap();
    view.repository().clear();
    view.handle(ViewEvent::Delete).unwrap();

    let mutations = view.repository().mutations();
    assert!(
        matches!(mutations.as_slice(), [Call::Delete(contact)] if contact.id == Some(eileen_id))
    );
    assert_eq!(
        view.repository().calls().last(),
        Some(&Call::FindAll)
    );
    assert_eq!(first_names(&view), vec!["Anna", "Dan", "Barry"]);
    assert!(view.form().is_empty());
    assert_eq!(*view.selection(), Selection::Empty);
    assert_eq!(messages(&mut view), vec!["Contact deleted."]);
}

#[test]
fn refresh_after_mutation_keeps_the_active_filter() {
    let fixture = fixture();
    let mut view = open_view(&fixture);

    view.handle(ViewEvent::FilterCommitted("an".to_string()))
        .unwrap();
    let anna_id = row_id(&view, "Anna");
    view.handle(ViewEvent::SelectionChanged(Some(anna_id)))
        .unwrap();
    view.repository().clear();
    view.handle(ViewEvent::Delete).unwrap();

    assert_eq!(
        view.repository().calls().last(),
        Some(&Call::FindByNameFragment("an".to_string()))
    );
    assert_eq!(first_names(&view), vec!["Dan"]);
}

#[test]
fn delete_without_selection_is_a_no_op() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    view.repository().clear();

    view.handle(ViewEvent::Delete).unwrap();

    assert!(view.repository().calls().is_empty());
    assert!(view.take_notifications().is_empty());
}

#[test]
fn deleting_an_unsaved_draft_goes_through_the_repository() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    view.handle(ViewEvent::AddContact).unwrap();
    view.handle(ViewEvent::FieldEdited(FieldEdit::FirstName(
        "Draft".to_string(),
    )))
    .unwrap();
    view.repository().clear();

    view.handle(ViewEvent::Delete).unwrap();

    let calls = view.repository().calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[0], Call::Delete(contact) if contact.id.is_none()));
    assert_eq!(calls[1], Call::FindAll);
    assert_eq!(view.grid().rows().len(), 4);
    assert_eq!(*view.selection(), Selection::Empty);
    assert!(view.form().is_empty());
    assert_eq!(messages(&mut view), vec!["Contact deleted."]);
}

#[test]
fn failed_save_without_selection_starts_editing_a_new_contact() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    view.handle(ViewEvent::FieldEdited(FieldEdit::FirstName(
        "Kim".to_string(),
    )))
    .unwrap();
    view.repository().clear();

    view.handle(ViewEvent::Save).unwrap();

    assert!(view.repository().calls().is_empty());
    assert_eq!(*view.selection(), Selection::Editing(Contact::new()));
    assert_eq!(view.form().first_name(), "Kim");
    assert_eq!(
        messages(&mut view),
        vec!["Please enter a valid contact details."]
    );

    view.handle(ViewEvent::Delete).unwrap();
    assert_eq!(*view.selection(), Selection::Empty);
    assert!(view.form().is_empty());
    assert_eq!(messages(&mut view), vec!["Contact deleted."]);
}

#[test]
fn configured_filter_timeout_controls_the_typing_pause() {
    let fixture = fixture();
    let companies = SqliteCompanyRepository::new(&fixture.conn)
        .find_all_companies()
        .unwrap();
    let mut view = MainView::new(
        RecordingRepository::new(&fixture.conn),
        companies,
        ViewOptions {
            filter_timeout: Duration::from_millis(50),
            ..ViewOptions::default()
        },
    )
    .unwrap();
    view.repository().clear();
    let start = Instant::now();

    view.handle(ViewEvent::FilterTyped {
        text: "dan".to_string(),
        at: start,
    })
    .unwrap();
    view.handle(ViewEvent::Tick(start + Duration::from_millis(60)))
        .unwrap();

    assert_eq!(
        view.repository().calls(),
        vec![Call::FindByNameFragment("dan".to_string())]
    );
    assert_eq!(first_names(&view), vec!["Dan"]);
}

#[test]
fn closing_clears_the_form_without_repository_calls() {
    let fixture = fixture();
    let mut view = open_view(&fixture);
    let barry_id = row_id(&view, "Barry");

    view.handle(ViewEvent::SelectionChanged(Some(barry_id)))
        .unwrap();
    view.handle(ViewEvent::FieldEdited(FieldEdit::LastName(
        "Changed".to_string(),
    )))
    .unwrap();
    view.repository().clear();

    view.handle(ViewEvent::Close).unwrap();

    assert!(view.repository().calls().is_empty());
    assert_eq!(*view.selection(), Selection::Empty);
    assert!(view.form().is_empty());
    assert_eq!(view.grid().find(barry_id).unwrap().last_name, "Rodriquez");
}

#[test]
fn unknown_company_choice_is_ignored() {
    let fixture = fixture();
    let mut view = open_view(&fixture);

    view.handle(ViewEvent::FieldEdited(FieldEdit::Company(Some(
        uuid::Uuid::new_v4(),
    ))))
    .unwrap();

    assert!(view.form().company().is_none());
}
