// mod.rs - Input loaders

pub mod csv;
pub mod fasta;

pub use self::csv::{load_comparisons, load_metadata, read_comparisons, read_metadata, MetadataRole};
pub use self::fasta::{genome_name, load_locus_map, load_path_list, read_locus_map, read_path_list};

use std::path::Path;

/// Field delimiter inferred from the file extension (tab for .tsv/.txt, comma otherwise)
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|s| s.to_str()).unwrap_or("") {
        "tsv" | "txt" | "tab" => b'\t',
        _ => b',',
    }
}
