use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use recordkeep_core::{IngestError, LineError, Record};
use recordkeep_events::StoreEvent;
use recordkeep_products::{Product, ProductList};

fn fixture(contents: &str) -> tempfile::NamedTempFile {
    recordkeep_observability::init();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn mixed_file_keeps_only_valid_lines() {
    let file = fixture("1/Widget/10/2.50\n2/Bad/-3/5.00\nx/Oops/1/1.00\n///\n");
    let mut list = ProductList::new();

    let report = list.ingest(file.path()).unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list.records()[0], Product::new(1, "Widget", 10, 2.5));
    assert_eq!(report.lines, 4);
    assert_eq!(report.created, 1);

    let reasons: Vec<(usize, LineError)> = report
        .skipped
        .iter()
        .map(|s| (s.line, s.reason.clone()))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (2, LineError::invalid("quantity", "-3")),
            (3, LineError::invalid("id", "x")),
            (4, LineError::invalid("id", "")),
        ]
    );
}

#[test]
fn initialize_reports_success_for_partial_files() {
    let file = fixture("1/Widget/10/2.50\nnot a record\n");
    let mut list = ProductList::new();
    assert!(list.initialize(file.path()));
    assert_eq!(list.len(), 1);
}

#[test]
fn missing_file_fails_and_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.txt");
    let mut list = ProductList::new();

    assert!(!list.initialize(&path));
    assert!(list.is_empty());
    assert_eq!(list.ingest(&path).unwrap_err(), IngestError::FileNotFound(path));
}

#[test]
fn fields_are_checked_in_order() {
    // Every numeric field is bad; only the first (id) is reported.
    let file = fixture("-1/Widget/-1/-1\n1/Widget/q/-1\n1/Widget/1/p\n");
    let mut list = ProductList::new();
    let report = list.ingest(file.path()).unwrap();

    let reasons: Vec<LineError> = report.skipped.into_iter().map(|s| s.reason).collect();
    assert_eq!(
        reasons,
        vec![
            LineError::invalid("id", "-1"),
            LineError::invalid("quantity", "q"),
            LineError::invalid("price", "p"),
        ]
    );
}

#[test]
fn blank_name_is_rejected_by_create() {
    let file = fixture("1/   /1/1.00\n");
    let mut list = ProductList::new();
    let report = list.ingest(file.path()).unwrap();
    assert!(list.is_empty());
    assert_eq!(report.skipped[0].reason, LineError::Rejected);
}

#[test]
fn ingestion_raises_created_per_record() {
    let file = fixture("1/Widget/10/2.50\n1/Widget Again/1/1\n2/Gadget/0/0\n");
    let mut list = ProductList::new();
    let created = Rc::new(RefCell::new(Vec::new()));
    let sink = created.clone();
    list.subscribe(StoreEvent::Created, move |_, p| sink.borrow_mut().push(p.id));

    assert!(list.initialize(file.path()));
    assert_eq!(*created.borrow(), vec![1, 1, 2]);
    assert_eq!(
        list.iter().map(Product::info).collect::<Vec<_>>(),
        list.records().iter().map(|p| p.to_string()).collect::<Vec<_>>()
    );
}

#[test]
fn custom_delimiter() {
    let file = fixture("7;Bolt;3;0.25\n");
    let mut list = ProductList::with_delimiter(';');
    assert!(list.initialize(file.path()));
    assert_eq!(list.get(7).map(Product::total), Some(0.75));
}

#[test]
fn extra_field_is_reported_not_dropped() {
    let file = fixture("1;Widget;10;2.50;extra\n2;Gadget;1;1.00\n");
    let mut list = ProductList::with_delimiter(';');
    let report = list.ingest(file.path()).unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list.records()[0].id(), 2);
    assert_eq!(
        report.skipped[0].reason,
        LineError::MissingData {
            expected: 4,
            found: 5
        }
    );
}

#[test]
fn byte_order_mark_does_not_cost_the_first_record() {
    let file = fixture("\u{FEFF}1/Widget/10/2.50\n2/Gadget/1/1.00\n");
    let mut list = ProductList::new();
    let report = list.ingest(file.path()).unwrap();

    assert!(report.is_clean());
    assert_eq!(list.len(), 2);
    assert_eq!(list.records()[0], Product::new(1, "Widget", 10, 2.5));
}
