//! Shared fixtures for the ingest integration tests
//!
//! [`ReleaseFixture`] stages a small but complete InterPro release in a
//! temporary directory: five Domain entries spread over the hierarchy, one
//! Family row that must be ignored, a gzipped protein2ipr with human and mouse
//! proteins, and a protein mapping table.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use iprkg_ingest::config::InterProConfig;
use iprkg_ingest::oracle::MappingTableOracle;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ENTRY_LIST: &str = "ENTRY_AC\tENTRY_TYPE\tENTRY_NAME\n\
IPR000001\tDomain\tKringle\n\
IPR000002\tFamily\tCdc20/Fizzy\n\
IPR000003\tDomain\tRetinoid X receptor/HNF4\n\
IPR000008\tDomain\tC2 domain\n\
IPR014705\tDomain\tSynaptotagmin-17, C2B domain\n";

pub const SHORT_NAMES: &str = "IPR000001\tKringle\n\
IPR000002\tCdc20/Fizzy\n\
IPR000008\tC2_dom\n\
IPR014705\tSyt17_C2B\n";

pub const TREE: &str = "IPR000008::C2 domain\n\
--IPR014705::Synaptotagmin-17, C2B domain\n\
--IPR033884::C2 domain, Munc13\n\
IPR000001::Kringle\n";

pub const INTERPRO2GO: &str = "!date: 2024/01/10 09:00:00\n\
!Mapping of InterPro entries to GO\n\
InterPro:IPR000001 Kringle > GO:protein binding ; GO:0005515\n\
InterPro:IPR000002 Cdc20/Fizzy > GO:anaphase-promoting complex binding ; GO:0010997\n\
InterPro:IPR000003 Retinoid X receptor/HNF4 > GO:DNA binding ; GO:0003677\n\
InterPro:IPR000003 Retinoid X receptor/HNF4 > GO:nuclear receptor activity ; GO:0004879\n";

pub const PROTEIN2IPR: &str = "P00747\tIPR000001\tKringle\tPF00051\t101\t180\n\
P02340\tIPR000001\tKringle\tPF00051\t5\t60\n\
Q9ZZZ1\tIPR000001\tKringle\tPF00051\t10\t90\n\
P04637\tIPR000003\tRetinoid X receptor/HNF4\tPS51030\t3\t40\n\
P20000\tIPR000003\tRetinoid X receptor/HNF4\tPS51030\t7\t77\n\
P10000\tIPR000003\tRetinoid X receptor/HNF4\tPS51030\t2\t50\n\
P30000\tIPR000008\tC2 domain\tPF00168\t12\t99\n\
P00747\tIPR000002\tCdc20/Fizzy\tPF00400\t1\t20\n\
P00747\tIPR000001\tKringle\tPS50070\t101\t180\n";

pub const MAPPING: &str = "accession\ttaxon_id\thgnc_id\n\
P00747\t9606\tHGNC:9071\n\
P04637\t9606\tHGNC:11998\n\
Q9ZZZ1\t9606\t\n\
P02340\t10090\t\n\
P10000\t9606\tHGNC:2\n\
P20000\t9606\t100\n\
P30000\t9606\tHGNC:10\n";

/// A staged release plus the directories a run writes to
pub struct ReleaseFixture {
    dir: TempDir,
}

impl ReleaseFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let fixture = Self { dir };

        std::fs::create_dir_all(fixture.data_dir()).unwrap();
        fixture.stage("entry.list", ENTRY_LIST);
        fixture.stage("short_names.dat", SHORT_NAMES);
        fixture.stage("ParentChildTreeFile.txt", TREE);
        fixture.stage("interpro2go", INTERPRO2GO);
        write_gzip(&fixture.data_dir().join("protein2ipr.dat.gz"), PROTEIN2IPR);
        std::fs::write(fixture.mapping_path(), MAPPING).unwrap();

        fixture
    }

    pub fn stage(&self, name: &str, content: &str) {
        std::fs::write(self.data_dir().join(name), content).unwrap();
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    pub fn mapping_path(&self) -> PathBuf {
        self.dir.path().join("uniprot_hgnc.tsv")
    }

    pub fn config(&self) -> InterProConfig {
        InterProConfig {
            data_dir: self.data_dir(),
            output_dir: self.output_dir(),
            protein_mapping: self.mapping_path(),
            ..InterProConfig::default()
        }
    }

    pub fn oracle(&self) -> MappingTableOracle {
        MappingTableOracle::from_path(self.mapping_path(), 9606).unwrap()
    }
}

pub fn write_gzip(path: &Path, content: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

pub fn gzip_bytes(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap()
}
