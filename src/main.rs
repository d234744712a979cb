mod cli;

use cli::{ClassifyConfig, CliError, Command, ModelsCommand};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tintype_core::{
    print_summary, progress, write_report, CascadeClassifier, ClassifyOptions, EngineConfig,
    ImageMeta, ImageSource,
};
use walkdir::WalkDir;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let command = Command::from_env().unwrap_or_else(|err| match err {
        CliError::Help => {
            println!("{}", err);
            std::process::exit(0);
        }
        _ => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    });

    match command {
        Command::Classify(config) => run_classify(config),
        Command::Models(command) => run_models(command),
    }
}

fn load_config(path: &Option<PathBuf>) -> EngineConfig {
    match path {
        Some(path) => EngineConfig::load(path).unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        }),
        None => EngineConfig::load_or_default(),
    }
}

fn run_classify(config: ClassifyConfig) {
    let engine_config = load_config(&config.config);
    let classifier = CascadeClassifier::new(&engine_config).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    let files = collect_images(&config.root, &config.extensions);
    if files.is_empty() {
        println!("No images found under {}", config.root.display());
        return;
    }

    let progress_bar = ProgressBar::new(files.len() as u64);
    progress_bar.set_style(progress::default_style());

    // Images are classified strictly one at a time; a failure on one
    // cannot corrupt the next, and each still yields a result.
    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        let meta = image_meta(&path);
        let result = classifier.classify(
            &ImageSource::Path(path.clone()),
            &meta,
            &ClassifyOptions::default(),
        );
        entries.push((path, result));
        progress_bar.inc(1);
    }
    progress_bar.finish_with_message("Classification complete");

    if config.unload {
        classifier.unload_models();
    }

    print_summary(&entries);
    match write_report(&entries, &config.output) {
        Ok(_) => println!("Report written to {}", config.output.display()),
        Err(error) => eprintln!("Error writing report: {}", error),
    }
}

fn run_models(command: ModelsCommand) {
    let engine_config = load_config(&command.config);
    let descriptors = engine_config.descriptors().unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    for descriptor in descriptors {
        let presence = if descriptor.file_path.exists() {
            "present"
        } else {
            "missing"
        };
        println!(
            "{:<20} {} ({}, {} classes, input {}px)",
            descriptor.kind,
            descriptor.file_path.display(),
            presence,
            descriptor.class_labels.len(),
            descriptor.input_size,
        );
    }
}

fn image_meta(path: &Path) -> ImageMeta {
    ImageMeta {
        file_name: path
            .file_name()
            .and_then(|name| name.to_str())
            .map(String::from),
        file_size: std::fs::metadata(path).ok().map(|meta| meta.len()),
        timestamp: None,
        dimensions: None,
    }
}

fn collect_images(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.iter().any(|known| ext.eq_ignore_ascii_case(known)))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}
