use clap::{Arg, Command, value_parser};
use flatjson_i18n::{DEFAULT_OUTPUT_FILE, SourceDocument, load_document_from_file, save_records_to_file};
use flatjson_i18n_mt::{
    AUTH_KEY_ENV, DEEPL_ENDPOINT, DeepLTranslator, MachineTranslator, MissingTranslation, MockMode,
    MockTranslator, MtResult, Pipeline, PipelineConfig, TranslationReport,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("flatjson-mt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate the values of a flat JSON file with DeepL, keeping %-placeholders intact")
        .arg(
            Arg::new("input")
                .help("Source JSON file (flat object of strings)")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Where to save the translated JSON")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT_FILE),
        )
        .arg(
            Arg::new("auth-key")
                .long("auth-key")
                .short('k')
                .help("DeepL authentication key (default: $DEEPL_AUTH_KEY)"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .help("DeepL translate URL (use https://api.deepl.com/v2/translate for paid plans)")
                .default_value(DEEPL_ENDPOINT),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock translator instead of DeepL")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("missing")
                .long("missing")
                .help("Value for entries whose batch failed")
                .value_parser(["empty", "original"])
                .default_value("empty"),
        )
        .arg(
            Arg::new("batch-size")
                .long("batch-size")
                .help("Maximum entries per request")
                .value_parser(value_parser!(usize))
                .default_value("50"),
        )
        .arg(
            Arg::new("pacing-ms")
                .long("pacing-ms")
                .help("Delay before each request, in milliseconds")
                .value_parser(value_parser!(u64))
                .default_value("100"),
        )
        .arg(
            Arg::new("marker")
                .long("marker")
                .help("Tag name wrapped around placeholders")
                .default_value(flatjson_i18n_mt::DEFAULT_MARKER),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Print every translated entry")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Arguments with defaults or `required` are always present
    let input = matches
        .get_one::<PathBuf>("input")
        .ok_or("missing input file")?;
    let output = matches
        .get_one::<PathBuf>("output")
        .ok_or("missing output file")?;
    let missing: MissingTranslation = matches
        .get_one::<String>("missing")
        .map(String::as_str)
        .unwrap_or("empty")
        .parse()?;
    let batch_size = matches.get_one::<usize>("batch-size").copied().unwrap_or(50);
    let pacing_ms = matches.get_one::<u64>("pacing-ms").copied().unwrap_or(100);
    let marker = matches
        .get_one::<String>("marker")
        .cloned()
        .unwrap_or_else(|| flatjson_i18n_mt::DEFAULT_MARKER.to_string());
    let use_mock = matches.get_flag("mock");
    let verbose = matches.get_flag("verbose");

    let config = PipelineConfig::new()
        .with_batch_size(batch_size)
        .with_pacing(Duration::from_millis(pacing_ms))
        .with_marker(marker)
        .with_missing(missing);

    // 1. Load document
    let document = match load_document_from_file(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("❌ Failed to load {}: {}", input.display(), e);
            return Err(e.into());
        }
    };
    println!("📝 Loaded {} entries from {}", document.len(), input.display());

    // 2. Translate
    let report = if use_mock {
        run(MockTranslator::new(MockMode::Suffix), config, &document).await?
    } else {
        let auth_key = match matches.get_one::<String>("auth-key") {
            Some(key) => key.clone(),
            None => env::var(AUTH_KEY_ENV).unwrap_or_default(),
        };
        if auth_key.is_empty() {
            warn!(
                "No DeepL key given (set {} or pass --auth-key); requests will be rejected",
                AUTH_KEY_ENV
            );
        }
        let endpoint = matches
            .get_one::<String>("endpoint")
            .cloned()
            .unwrap_or_else(|| DEEPL_ENDPOINT.to_string());
        let provider =
            DeepLTranslator::with_timeout(auth_key, config.request_timeout)?.with_endpoint(endpoint);
        run(provider, config, &document).await?
    };

    if verbose {
        println!("🌍 Translated entries:");
        for record in &report.records {
            println!(
                "   {}: \"{}\" → \"{}\"",
                record.name, record.value, record.translated_value
            );
        }
        println!();
    }

    println!(
        "✅ {}/{} entries translated in {} batches",
        report.translated_count(),
        report.records.len(),
        report.batch_count
    );
    for failure in &report.failures {
        eprintln!(
            "⚠️  Batch {} failed ({} entries): {}",
            failure.batch_index,
            failure.keys.len(),
            failure.error
        );
    }

    // 3. Save
    save_records_to_file(output, &report.records)?;
    println!("💾 Saved {}", output.display());

    Ok(())
}

async fn run<T: MachineTranslator>(
    translator: T,
    config: PipelineConfig,
    document: &SourceDocument,
) -> MtResult<TranslationReport> {
    let pipeline = Pipeline::new(translator, config)?;
    info!(
        provider = pipeline.translator().provider_name(),
        batch_size = pipeline.config().batch_size,
        pacing_ms = pipeline.config().pacing.as_millis() as u64,
        "Starting translation"
    );
    Ok(pipeline.translate_parsed(document).await)
}
