// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// pairlink - Label genome pairs by temporal, geographic and genomic proximity
pub struct Args {
    /// pairwise comparison table (.csv or .tsv) with Genome1, Genome2, ANI, Gene Jaccard, Allele Jaccard, Gene Difference
    #[argh(option, short = 'c')]
    pub comparisons: Option<String>,

    /// sample metadata table (.csv or .tsv)
    #[argh(option, short = 'm')]
    pub meta: Option<String>,

    /// optional second metadata table; its rows are appended (must have a fasta column)
    #[argh(option, short = 'n')]
    pub meta2: Option<String>,

    /// output file for the labeled comparison table
    #[argh(option, short = 'o')]
    pub output: Option<String>,

    /// output format: csv, tsv (default: csv)
    #[argh(option, default = "String::from(\"csv\")")]
    pub format: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// validate and load inputs, report join statistics, write nothing
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
