extern crate getopts;

use std::process;

use getopts::Options;
use tracing_subscriber::EnvFilter;

use genevar::bio::fasta::format_fasta;
use genevar::bio::variant::Substitution;
use genevar::data_types::{ErrorResponse, GeneInfoRequest, GeneInfoResponse};
use genevar::lookup::lookup_gene_info;
use genevar::provider::ProviderChain;
use genevar::web::config::Config;

const FASTA_LINE_WIDTH: usize = 60;

fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} -g GENE [-v VARIANT] [options]", program);
    print!("{}", opts.usage(&brief));
}

fn print_fasta(response: &GeneInfoResponse) {
    let Some(ref wild_type) = response.wild_type_sequence else {
        eprintln!("no protein sequence available for {}", response.gene_name);
        return;
    };

    print!("{}", format_fasta(response.gene_name.as_str(), Some("wild type"),
                              wild_type, FASTA_LINE_WIDTH));

    if let Some(ref variant) = response.variant {
        let result = Substitution::parse(variant)
            .and_then(|subst| Ok((subst, subst.apply(wild_type)?)));

        match result {
            Ok((subst, variant_sequence)) => {
                let id = format!("{}_{}", response.gene_name, subst);
                print!("{}", format_fasta(&id, Some("variant"), &variant_sequence,
                                          FASTA_LINE_WIDTH));
            },
            Err(err) => eprintln!("{}", err),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options::new();

    opts.optflag("h", "help", "print this help message");
    opts.optopt("c", "config-file", "Configuration file name", "CONFIG");
    opts.optopt("g", "gene", "Gene symbol to look up, eg. TP53", "GENE");
    opts.optopt("v", "variant", "Amino acid substitution, eg. M1E", "VARIANT");
    opts.optflag("", "offline", "only use the local gene table, don't query NCBI");
    opts.optflag("", "fasta", "print the sequences as FASTA rather than JSON");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("Invalid options\n{}", f);
            print_usage(&args[0], opts);
            process::exit(1);
        }
    };

    let program = args[0].clone();

    if matches.opt_present("help") {
        print_usage(&program, opts);
        process::exit(0);
    }
    if !matches.opt_present("gene") {
        println!("no -g|--gene option");
        print_usage(&program, opts);
        process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("genevar=warn"))?,
        )
        .init();

    let mut config =
        if let Some(config_file_name) = matches.opt_str("config-file") {
            Config::read(&config_file_name)?
        } else {
            Config::default()
        };

    if matches.opt_present("offline") {
        config.make_offline();
    }

    let provider = ProviderChain::from_config(&config)?;

    let request = GeneInfoRequest {
        gene: matches.opt_str("gene"),
        variant: matches.opt_str("variant"),
    };

    match lookup_gene_info(&provider, &request).await {
        Ok(response) => {
            if matches.opt_present("fasta") {
                print_fasta(&response);
            } else {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
        },
        Err(err) => {
            let error_response = ErrorResponse { error: err.to_string() };
            println!("{}", serde_json::to_string_pretty(&error_response)?);
            process::exit(1);
        }
    }

    Ok(())
}
