// InterPro Entry Catalog
//
// Loads entry.list and short_names.dat and joins them.
//
// File Formats:
// 1. entry.list - TSV with one header line
//    Format: ENTRY_AC ENTRY_TYPE ENTRY_NAME
//    Example: IPR000001 Domain Kringle
//
// 2. short_names.dat - TSV, no header
//    Format: ENTRY_AC ENTRY_SHORT_NAME
//    Example: IPR000001 Kringle

use super::models::{EntryRow, EntryType, InterProEntry, ShortNameRow};
use super::{InterProError, Result};
use crate::fetch::{Fetcher, SourceFile};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use tracing::{debug, info};

const ENTRY_LIST: &str = "entry.list";
const SHORT_NAMES: &str = "short_names.dat";

/// Load the Domain entries of the release, with their short names
pub fn load_entries<F: Fetcher + ?Sized>(fetcher: &F, force: bool) -> Result<Vec<InterProEntry>> {
    let entry_path = fetcher.ensure(SourceFile::EntryList, force)?;
    let short_name_path = fetcher.ensure(SourceFile::ShortNames, force)?;

    let rows = read_entry_rows(std::fs::File::open(&entry_path)?)?;
    let short_names = read_short_names(std::fs::File::open(&short_name_path)?)?;
    let entries = join_entries(rows, &short_names)?;

    info!(
        domains = entries.len(),
        short_names = short_names.len(),
        "Loaded InterPro entry catalog"
    );

    Ok(entries)
}

fn tsv_reader<R: Read>(reader: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(has_headers)
        .from_reader(reader)
}

/// Rows of entry.list in file order, header skipped
pub fn read_entry_rows<R: Read>(reader: R) -> Result<Vec<EntryRow>> {
    let mut rdr = tsv_reader(reader, true);
    let mut rows = Vec::new();

    for record in rdr.records() {
        let record = record.map_err(|e| InterProError::from_csv(ENTRY_LIST, e))?;
        let row: EntryRow = record
            .deserialize(None)
            .map_err(|e| InterProError::from_csv(ENTRY_LIST, e))?;
        rows.push(row);
    }

    debug!("Read {} rows from {}", rows.len(), ENTRY_LIST);
    Ok(rows)
}

/// Accession -> short name. The first occurrence of an accession wins.
pub fn read_short_names<R: Read>(reader: R) -> Result<HashMap<String, String>> {
    let mut rdr = tsv_reader(reader, false);
    let mut short_names = HashMap::new();

    for record in rdr.records() {
        let record = record.map_err(|e| InterProError::from_csv(SHORT_NAMES, e))?;
        let row: ShortNameRow = record
            .deserialize(None)
            .map_err(|e| InterProError::from_csv(SHORT_NAMES, e))?;
        short_names.entry(row.accession).or_insert(row.short_name);
    }

    Ok(short_names)
}

/// Left-join short names onto entry rows and keep Domain entries.
///
/// Every row's type is validated, not only the retained ones: an unknown
/// type means the release format changed. Accessions must be unique.
pub fn join_entries(
    rows: Vec<EntryRow>,
    short_names: &HashMap<String, String>,
) -> Result<Vec<InterProEntry>> {
    let mut entries = Vec::new();
    let mut seen = HashSet::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        // +1 for the header, +1 for 1-based lines
        let line = index + 2;
        if !seen.insert(row.accession.clone()) {
            return Err(InterProError::parse(
                ENTRY_LIST,
                line,
                format!("duplicate accession {}", row.accession),
            ));
        }
        let entry_type: EntryType = row
            .entry_type
            .parse()
            .map_err(|_| InterProError::InvalidEntryType {
                line,
                value: row.entry_type.clone(),
            })?;

        if entry_type != EntryType::Domain {
            continue;
        }

        let short_name = short_names.get(&row.accession).cloned();
        entries.push(InterProEntry {
            interpro_id: row.accession,
            entry_type,
            name: row.name,
            short_name,
        });
    }

    Ok(entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ENTRIES: &str = "ENTRY_AC\tENTRY_TYPE\tENTRY_NAME\n\
                           IPR000001\tDomain\tKringle\n\
                           IPR000002\tFamily\tCdc20/Fizzy\n\
                           IPR000003\tDomain\tRetinoid X receptor/HNF4\n";

    const SHORT_NAMES: &str = "IPR000001\tKringle\nIPR000002\tCdc20/Fizzy\n";

    #[test]
    fn test_read_entry_rows_skips_header() {
        let rows = read_entry_rows(ENTRIES.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].accession, "IPR000001");
        assert_eq!(rows[2].name, "Retinoid X receptor/HNF4");
    }

    #[test]
    fn test_join_keeps_domains_in_order() {
        let rows = read_entry_rows(ENTRIES.as_bytes()).unwrap();
        let short_names = read_short_names(SHORT_NAMES.as_bytes()).unwrap();
        let entries = join_entries(rows, &short_names).unwrap();

        let ids: Vec<&str> = entries.iter().map(|e| e.interpro_id.as_str()).collect();
        assert_eq!(ids, vec!["IPR000001", "IPR000003"]);
        assert_eq!(entries[0].short_name.as_deref(), Some("Kringle"));
        // No short name for IPR000003
        assert_eq!(entries[1].short_name, None);
        assert!(entries.iter().all(|e| e.entry_type == EntryType::Domain));
    }

    #[test]
    fn test_one_domain_one_family() {
        let input = "ENTRY_AC\tENTRY_TYPE\tENTRY_NAME\n\
                     IPR000010\tDomain\tCystatin domain\n\
                     IPR000011\tFamily\tUbiquitin-activating enzyme E1\n";
        let rows = read_entry_rows(input.as_bytes()).unwrap();
        let entries = join_entries(rows, &HashMap::new()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].interpro_id, "IPR000010");
    }

    #[test]
    fn test_wrong_column_count_is_error() {
        let input = "ENTRY_AC\tENTRY_TYPE\tENTRY_NAME\n\
                     IPR000001\tDomain\n";
        let err = read_entry_rows(input.as_bytes()).unwrap_err();
        assert!(matches!(err, InterProError::Parse { file: "entry.list", line: 2, .. }));
    }

    #[test]
    fn test_unknown_entry_type_is_error() {
        let input = "ENTRY_AC\tENTRY_TYPE\tENTRY_NAME\n\
                     IPR000001\tDomain\tKringle\n\
                     IPR000099\tMotif\tSomething new\n";
        let rows = read_entry_rows(input.as_bytes()).unwrap();
        let err = join_entries(rows, &HashMap::new()).unwrap_err();
        assert!(matches!(err, InterProError::InvalidEntryType { line: 3, .. }));
    }

    #[test]
    fn test_duplicate_accession_is_error() {
        let input = "ENTRY_AC\tENTRY_TYPE\tENTRY_NAME\n\
                     IPR000001\tDomain\tKringle\n\
                     IPR000001\tDomain\tKringle\n";
        let rows = read_entry_rows(input.as_bytes()).unwrap();
        let err = join_entries(rows, &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("duplicate accession IPR000001"));
    }

    #[test]
    fn test_short_names_first_wins() {
        let short_names = read_short_names("IPR1\tA\nIPR1\tB\n".as_bytes()).unwrap();
        assert_eq!(short_names.get("IPR1").map(String::as_str), Some("A"));
    }

    #[test]
    fn test_names_with_quotes_are_kept_verbatim() {
        let input = "ENTRY_AC\tENTRY_TYPE\tENTRY_NAME\n\
                     IPR000123\tDomain\t\"Winged helix\" DNA-binding domain\n";
        let rows = read_entry_rows(input.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "\"Winged helix\" DNA-binding domain");
    }
}
