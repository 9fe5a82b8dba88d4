// mod.rs - Output writers for labeled tables and similarity reports

use crate::core::{ClassifiedPair, SimilarityReport};
use crate::data::SampleMetadata;
use crate::error::{LinkageError, Result};
use std::fs::{create_dir_all, File};
use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Delimited text format of the labeled table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn delimiter(&self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LinkageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            other => Err(LinkageError::validation(format!(
                "Invalid output format '{}'. Use: csv, tsv",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}

/// Columns of the labeled comparison table, in output order
pub const OUTPUT_COLUMNS: [&str; 30] = [
    "Genome1", "Genome2",
    "pathogen_1", "species_1", "subtype_1", "hhsregion_1", "state_1", "year_1", "month_1",
    "host_1", "source_1", "casetype_1",
    "pathogen_2", "species_2", "subtype_2", "hhsregion_2", "state_2", "year_2", "month_2",
    "host_2", "source_2", "casetype_2",
    "ANI", "Gene Difference", "Gene Jaccard", "Allele Jaccard",
    "Time Comparison", "Geo Comparison", "ANI Category", "Case Comparison",
];

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Render floats the way tabular tools do: whole values keep one decimal
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn push_metadata(fields: &mut Vec<String>, meta: &SampleMetadata) {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    fields.push(text(&meta.pathogen));
    fields.push(text(&meta.species));
    fields.push(text(&meta.subtype));
    fields.push(meta.region.to_string());
    fields.push(text(&meta.location));
    fields.push(meta.year.clone());
    fields.push(meta.month.clone());
    fields.push(text(&meta.host));
    fields.push(text(&meta.source));
    fields.push(text(&meta.casetype));
}

/// Fields of one labeled row, aligned with [`OUTPUT_COLUMNS`]
pub fn labeled_fields(row: &ClassifiedPair) -> Vec<String> {
    let mut fields = Vec::with_capacity(OUTPUT_COLUMNS.len());
    fields.push(row.comparison.genome1.clone());
    fields.push(row.comparison.genome2.clone());
    push_metadata(&mut fields, &row.meta1);
    push_metadata(&mut fields, &row.meta2);
    fields.push(format_float(row.comparison.ani));
    fields.push(row.comparison.gene_difference.to_string());
    fields.push(format_float(row.comparison.gene_jaccard));
    fields.push(format_float(row.comparison.allele_jaccard));
    fields.push(row.time.to_string());
    fields.push(row.geo.to_string());
    fields.push(row.ani_category.to_string());
    fields.push(row.case.to_string());
    fields
}

/// Write the labeled table to any writer
pub fn write_labeled<W: Write>(writer: W, rows: &[ClassifiedPair], delimiter: u8) -> Result<()> {
    let mut wtr = ::csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    wtr.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        wtr.write_record(labeled_fields(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the labeled table to a file in the given format
pub fn write_labeled_table(file_path: &str, format: OutputFormat, rows: &[ClassifiedPair]) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)?;
    write_labeled(BufWriter::new(file), rows, format.delimiter())?;
    println!(
        "✅ Labeled comparisons written to: {} ({} rows, {})",
        file_path,
        rows.len(),
        format
    );
    Ok(())
}

/// Write similarity report rows, optionally preceded by a header line
pub fn write_similarity_reports<W: Write>(
    mut writer: W,
    reports: &[SimilarityReport],
    header: bool,
) -> Result<()> {
    if header {
        writeln!(writer, "{}", SimilarityReport::TSV_HEADER)?;
    }
    for report in reports {
        writeln!(writer, "{}", report)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{classify_comparisons, compare_loci, JaccardMode};
    use crate::data::loaders::{read_comparisons, read_metadata, MetadataRole};
    use crate::data::{HhsRegionTable, LocusMap, MetadataNormalizer};

    const COMPARISONS: &str = "\
Genome1,Genome2,ANI,Gene Jaccard,Allele Jaccard,Gene Difference
g1,g2,99.9,0.99,0.95,10
g1,g3,99.7,0.95,0.90,40
g2,g4,99.0,0.80,0.80,120
g3,g9,99.9,0.99,0.99,1
";

    const METADATA: &str = "\
sample,pathogen,species,subtype,state,country,year,month,host,source,casetype,fastq_1,fastq_2
g1,Listeria,monocytogenes,CC1,GA,USA,2023,4,human,blood,clinical,a,b
g2,Listeria,monocytogenes,CC1,GA,USA,2023,5,human,blood,clinical,a,b
g3,Listeria,monocytogenes,CC1,FL,USA,2023,1,food,cheese,non-clinical,a,b
g4,Listeria,monocytogenes,CC2,,Mexico,,,human,,clinical,a,b
";

    fn classify() -> Vec<ClassifiedPair> {
        let comps = read_comparisons(COMPARISONS.as_bytes(), b',').unwrap();
        let raw = read_metadata(METADATA.as_bytes(), b',', MetadataRole::Primary).unwrap();
        let table = HhsRegionTable::new();
        let meta = MetadataNormalizer::new(&table).normalize_all(&raw, None).unwrap();
        classify_comparisons(&comps, &meta).rows
    }

    fn render(rows: &[ClassifiedPair]) -> String {
        let mut buf = Vec::new();
        write_labeled(&mut buf, rows, b',').unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_labeled_table_end_to_end() {
        let rows = classify();
        assert_eq!(rows.len(), 3); // g9 has no metadata

        let text = render(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Genome1,Genome2,pathogen_1"));
        assert_eq!(lines[0].split(',').count(), OUTPUT_COLUMNS.len());

        assert_eq!(
            lines[1],
            "g1,g2,Listeria,monocytogenes,CC1,4,GA,2023,4,human,blood,clinical,\
Listeria,monocytogenes,CC1,4,GA,2023,5,human,blood,clinical,\
99.9,10,0.99,0.95,Approx. 30-45 days (same month),Same state,Same strain,Strongly linked"
        );
        assert!(lines[2].ends_with(
            "Less than 120 days,Multistate - same HHS Region,Same subtype family,Possibly linked (relaxed linkage)"
        ));
        assert!(lines[3].contains(",International,Mexico,1900,0,"));
        assert!(lines[3].ends_with(
            "Longer than 12 months apart,Multistate - Widespread,Same species,Unlikely to be linked"
        ));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        assert_eq!(render(&classify()), render(&classify()));
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(99.0), "99.0");
        assert_eq!(format_float(99.885), "99.885");
        assert_eq!(format_float(0.9850), "0.985");
    }

    #[test]
    fn test_output_format() {
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!(OutputFormat::Csv.delimiter(), b',');
        let err = "xlsx".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, LinkageError::Validation(_)));
    }

    #[test]
    fn test_write_labeled_table_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/labeled.tsv");
        let path = path.to_str().unwrap();
        write_labeled_table(path, OutputFormat::Tsv, &classify()).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("Genome1\tGenome2\t"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_similarity_report_rows() {
        let a = LocusMap::from_entries("a.fasta", vec![("l1", "x"), ("l2", "y")]).unwrap();
        let b = LocusMap::from_entries("b.fasta", vec![("l1", "x"), ("l2", "z")]).unwrap();
        let report = compare_loci(&a, &b, JaccardMode::Similarity);

        let mut buf = Vec::new();
        write_similarity_reports(&mut buf, &[report], true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("a.fasta\tb.fasta\t2\t2\t0\t1.0000\t1\t0.5000")
        );
    }
}
