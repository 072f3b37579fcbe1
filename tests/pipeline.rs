use std::num::NonZeroUsize;

use aideon_contacts::ContactError;
use aideon_contacts::chunk::{self, ChunkConfig};
use aideon_contacts::ingest::{self, SourceFile, SourceKind};
use aideon_contacts::io::excel_read::WorkbookFormat;
use aideon_contacts::model::{Contact, NOT_AVAILABLE};

fn populated_csv(rows: usize) -> String {
    let mut csv = String::from("name,email,phone\n");
    for i in 1..=rows {
        csv.push_str(&format!("Person {i},person{i}@example.com,+1555{i:04}\n"));
    }
    csv
}

fn contacts(count: usize) -> Vec<Contact> {
    (1..=count)
        .map(|i| {
            Contact::new(
                Some(format!("Person {i}").as_str()),
                Some(format!("person{i}@example.com").as_str()),
                None,
            )
        })
        .collect()
}

fn size(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).expect("non-zero chunk size")
}

#[test]
fn two_hundred_fifty_rows_make_three_groups() {
    let source = SourceFile::new("contacts.csv", populated_csv(250));
    let ingestion = ingest::ingest(&source, &ChunkConfig::default()).expect("ingestion");

    assert_eq!(ingestion.total_contacts, 250);
    let sizes: Vec<usize> = ingestion.groups.iter().map(|group| group.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);

    let first = &ingestion.groups[0];
    assert_eq!((first.ordinal, first.start_index, first.end_index), (1, 1, 100));
    let last = &ingestion.groups[2];
    assert_eq!((last.ordinal, last.start_index, last.end_index), (3, 201, 250));
    assert_eq!(last.contacts[0].name, "Person 201");
}

#[test]
fn groups_partition_the_valid_sequence() {
    let valid = contacts(23);
    let config = ChunkConfig::default().with_chunk_size(size(5));
    let groups = chunk::chunk(&valid, &config);

    assert_eq!(groups.len(), 5);
    let total: usize = groups.iter().map(|group| group.len()).sum();
    assert_eq!(total, valid.len());

    for (position, group) in groups.iter().enumerate() {
        assert_eq!(group.ordinal, position + 1);
        assert_eq!(group.end_index - group.start_index + 1, group.len());
        if position + 1 < groups.len() {
            assert_eq!(group.len(), 5);
        }
    }
    for pair in groups.windows(2) {
        assert_eq!(pair[1].start_index, pair[0].end_index + 1);
    }

    let rejoined: Vec<Contact> = groups
        .iter()
        .flat_map(|group| group.contacts.iter().cloned())
        .collect();
    assert_eq!(rejoined, valid);
}

#[test]
fn group_ids_are_distinct_and_stable() {
    let valid = contacts(7);
    let config = ChunkConfig::default().with_chunk_size(size(3));
    let groups = chunk::chunk(&valid, &config);

    assert_eq!(groups.len(), 3);
    assert_ne!(groups[0].id, groups[1].id);
    assert_ne!(groups[1].id, groups[2].id);
    assert_eq!(groups[2].id, chunk::group_id(2));
}

#[test]
fn rerunning_the_pipeline_yields_identical_groups() {
    let source = SourceFile::new("contacts.csv", populated_csv(130));
    let config = ChunkConfig::default();

    let first = ingest::ingest(&source, &config).expect("first run");
    let second = ingest::ingest(&source, &config).expect("second run");

    assert_eq!(first, second);
}

#[test]
fn no_contacts_means_no_groups() {
    assert!(chunk::chunk(&[], &ChunkConfig::default()).is_empty());

    let header_only = SourceFile::new("contacts.csv", "name,email,phone\n");
    let ingestion = ingest::ingest(&header_only, &ChunkConfig::default()).expect("ingestion");
    assert_eq!(ingestion.total_contacts, 0);
    assert!(ingestion.groups.is_empty());

    let empty = SourceFile::new("contacts.csv", "");
    let ingestion = ingest::ingest(&empty, &ChunkConfig::default()).expect("ingestion");
    assert_eq!(ingestion.total_contacts, 0);
    assert!(ingestion.groups.is_empty());
}

#[test]
fn contacts_without_email_or_phone_are_dropped() {
    let csv = "name,email,phone\n\
               Ann,N/A,\n\
               Ben,N/A,undefined\n\
               Cat,N/A,+15551234\n\
               Dan,dan@example.com,\n\
               ,,\n";
    let source = SourceFile::new("contacts.csv", csv);
    let ingestion = ingest::ingest(&source, &ChunkConfig::default()).expect("ingestion");

    let names: Vec<&str> = ingestion.groups[0]
        .contacts
        .iter()
        .map(|contact| contact.name.as_str())
        .collect();
    assert_eq!(names, vec!["Cat", "Dan"]);
    assert_eq!(ingestion.total_contacts, 2);
}

#[test]
fn extension_selects_the_decoder() {
    assert_eq!(
        SourceKind::from_file_name("list.CSV"),
        Some(SourceKind::Delimited)
    );
    assert_eq!(
        SourceKind::from_file_name("list.xlsx"),
        Some(SourceKind::Workbook(WorkbookFormat::Xlsx))
    );
    assert_eq!(
        SourceKind::from_file_name("list.Xls"),
        Some(SourceKind::Workbook(WorkbookFormat::Xls))
    );
    assert_eq!(SourceKind::from_file_name(".csv"), Some(SourceKind::Delimited));
    assert_eq!(
        SourceKind::from_file_name("archive.tar.XLSX"),
        Some(SourceKind::Workbook(WorkbookFormat::Xlsx))
    );
    assert_eq!(SourceKind::from_file_name("list.txt"), None);
    assert_eq!(SourceKind::from_file_name("list"), None);
}

#[test]
fn unsupported_extension_yields_empty_result() {
    let source = SourceFile::new("contacts.txt", populated_csv(3));
    let ingestion = ingest::ingest(&source, &ChunkConfig::default()).expect("ingestion");

    assert_eq!(ingestion.total_contacts, 0);
    assert!(ingestion.groups.is_empty());
}

#[test]
fn malformed_content_is_a_decode_error() {
    let invalid_utf8 = SourceFile::new("contacts.csv", b"name,email\n\xff\xfe,a@x.com\n".to_vec());
    let error = ingest::ingest(&invalid_utf8, &ChunkConfig::default())
        .expect_err("invalid UTF-8 rejected");
    assert!(matches!(error, ContactError::Csv(_)));

    let not_a_workbook = SourceFile::new("contacts.xlsx", b"definitely not a zip".to_vec());
    let error = ingest::ingest(&not_a_workbook, &ChunkConfig::default())
        .expect_err("garbage workbook rejected");
    assert!(matches!(error, ContactError::ExcelRead(_)));

    let not_a_legacy_workbook = SourceFile::new("contacts.xls", b"definitely not OLE".to_vec());
    let error = ingest::ingest(&not_a_legacy_workbook, &ChunkConfig::default())
        .expect_err("garbage legacy workbook rejected");
    assert!(matches!(error, ContactError::LegacyExcelRead(_)));
}

#[test]
fn unterminated_quote_is_a_decode_error() {
    let csv = "name,email,phone\n\
               Ann,\"ann@x.com,1\n\
               Ben,ben@x.com,2\n\
               Cat,cat@x.com,3\n";
    let error = ingest::ingest(&SourceFile::new("contacts.csv", csv), &ChunkConfig::default())
        .expect_err("unterminated quote rejected");

    assert!(matches!(error, ContactError::InvalidDelimited(_)));
    assert!(error.to_string().contains("line 2"));
}

#[test]
fn file_named_only_by_extension_is_read() {
    let source = SourceFile::new(".csv", populated_csv(2));
    let ingestion = ingest::ingest(&source, &ChunkConfig::default()).expect("ingestion");
    assert_eq!(ingestion.total_contacts, 2);
}

#[test]
fn reading_a_missing_path_reports_the_path() {
    let temp_dir = tempfile::tempdir().expect("temporary directory");
    let path = temp_dir.path().join("absent.csv");

    let error = ingest::ingest_path(&path, &ChunkConfig::default()).expect_err("missing input");
    assert!(matches!(error, ContactError::MissingInput(missing) if missing == path));
}

#[test]
fn ingest_path_uses_the_file_name() {
    let temp_dir = tempfile::tempdir().expect("temporary directory");
    let path = temp_dir.path().join("team.csv");
    std::fs::write(&path, populated_csv(4)).expect("CSV written");

    let ingestion = ingest::ingest_path(&path, &ChunkConfig::default()).expect("ingestion");
    assert_eq!(ingestion.source, "team.csv");
    assert_eq!(ingestion.total_contacts, 4);
}

#[test]
fn summary_serializes_totals_and_ranges() {
    let source = SourceFile::new("contacts.csv", populated_csv(150));
    let ingestion = ingest::ingest(&source, &ChunkConfig::default()).expect("ingestion");

    let summary = serde_json::to_value(ingestion.summary()).expect("summary serialized");
    assert_eq!(summary["source"], "contacts.csv");
    assert_eq!(summary["totalContacts"], 150);
    assert_eq!(summary["groupCount"], 2);
    assert_eq!(summary["chunkSize"], 100);
    assert_eq!(summary["groups"][1]["startIndex"], 101);
    assert_eq!(summary["groups"][1]["endIndex"], 150);
    assert_eq!(summary["groups"][1]["size"], 50);
}

#[test]
fn group_lookup_is_one_based() {
    let source = SourceFile::new("contacts.csv", populated_csv(3));
    let config = ChunkConfig::default().with_chunk_size(size(2));
    let ingestion = ingest::ingest(&source, &config).expect("ingestion");

    assert!(ingestion.group(0).is_none());
    assert_eq!(ingestion.group(2).map(|group| group.len()), Some(1));
    assert!(ingestion.group(3).is_none());
    assert_eq!(ingestion.groups[0].contacts[0].email, "person1@example.com");
    assert_ne!(ingestion.groups[0].contacts[0].email, NOT_AVAILABLE);
}
