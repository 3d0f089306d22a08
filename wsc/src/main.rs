use std::{io::BufRead, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use libwsc::{compile_scores, Config, SourceOutcome};

/// Scores a word list by how often each word shows up in reference corpora
#[derive(Debug, clap::Parser)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Word list to score, one word per line
    #[arg(long)]
    word_list: Option<PathBuf>,

    /// Directory the score files are written to (recreated on every run)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory holding the installed corpora
    #[arg(long)]
    corpus_root: Option<PathBuf>,

    /// Skip sources that fail instead of aborting
    #[arg(long)]
    isolate_failures: bool,

    /// Exit right away instead of waiting for enter
    #[arg(long)]
    no_pause: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(word_list) = self.word_list {
            config.word_list = word_list;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(corpus_root) = self.corpus_root {
            config.corpus_root = corpus_root;
        }
        config.isolate_failures |= self.isolate_failures;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let pause = !args.no_pause;
    let config = args.into_config()?;

    let reports = compile_scores(config).context("scoring run failed")?;
    for report in &reports {
        if let SourceOutcome::Skipped { reason } = &report.outcome {
            log::warn!("{} skipped: {}", report.source, reason);
        }
    }

    if pause {
        println!("Press enter to exit");
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
    }

    Ok(())
}
