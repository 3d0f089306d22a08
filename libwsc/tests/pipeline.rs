use std::{fs, io::Write, path::Path};

use bzip2::{write::BzEncoder, Compression};
use libwsc::{
    compile_scores, Config, Error, ScoreCompiler, SourceConfig, SourceOutcome, TokenFormat,
};
use tempfile::TempDir;

fn write_bz2(path: &Path, text: &str) {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

/// Lays out a word list, four small corpora and two frequency lists.
fn fixture() -> (TempDir, Config) {
    let root = tempfile::tempdir().unwrap();
    let base = root.path();

    fs::write(
        base.join("Nouns.txt"),
        "apple\nTree\n  rock \nab3\nmist\nzzxqy\nrock\n",
    )
    .unwrap();

    let corpora = base.join("corpora");
    fs::create_dir_all(corpora.join("brown")).unwrap();
    fs::write(
        corpora.join("brown/ca01"),
        "The/at rock/nn and/cc the/at Mist/nn-tl ./.\nrock/nn",
    )
    .unwrap();

    fs::create_dir_all(corpora.join("reuters/training")).unwrap();
    write_bz2(
        &corpora.join("reuters/training/0001.bz2"),
        "Apple shares rose. APPLE apple mist",
    );

    fs::create_dir_all(corpora.join("treebank")).unwrap();
    fs::write(corpora.join("treebank/wsj_0001"), "Pierre Vinken , 61 years old").unwrap();

    fs::create_dir_all(corpora.join("gutenberg")).unwrap();
    fs::write(corpora.join("gutenberg/austen-emma.txt"), "Emma Woodhouse, rock; rock? mist").unwrap();
    fs::write(corpora.join("gutenberg/README"), "apple apple apple").unwrap();

    fs::create_dir_all(base.join("freq_list")).unwrap();
    fs::write(
        base.join("freq_list/combined_wordfreq.txt"),
        "apple 120\nrock 9\nmist xyz\nab\n",
    )
    .unwrap();
    fs::write(base.join("freq_list/wikipedia_wordfreq.txt"), "apple 120\n").unwrap();

    let config = Config {
        word_list: base.join("Nouns.txt"),
        output_dir: base.join("noun_scores"),
        corpus_root: corpora,
        isolate_failures: false,
        sources: vec![
            SourceConfig::corpus("brown", TokenFormat::Tagged),
            SourceConfig::corpus("reuters", TokenFormat::Plain),
            SourceConfig::corpus("treebank", TokenFormat::Plain),
            SourceConfig::corpus("gutenberg", TokenFormat::Plain),
            SourceConfig::file("wiki-gut", base.join("freq_list/combined_wordfreq.txt")),
            SourceConfig::file("wiki", base.join("freq_list/wikipedia_wordfreq.txt")),
        ],
    };
    (root, config)
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn scores_every_source() {
    let (_root, config) = fixture();
    let out = config.output_dir.clone();

    let reports = compile_scores(config).unwrap();
    let names = reports.iter().map(|r| r.source.as_str()).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["brown", "reuters", "treebank", "gutenberg", "wiki-gut", "wiki"]
    );

    assert_eq!(
        read(&out, "brown_scored.txt"),
        "rock   2\nrock   2\nmist   1\napple   0\nzzxqy   0\n"
    );
    assert_eq!(
        read(&out, "reuters_scored.txt"),
        "apple   3\nmist   1\nrock   0\nzzxqy   0\nrock   0\n"
    );
    assert_eq!(
        read(&out, "treebank_scored.txt"),
        "apple   0\nrock   0\nmist   0\nzzxqy   0\nrock   0\n"
    );
    assert_eq!(
        read(&out, "gutenberg_scored.txt"),
        "rock   2\nrock   2\nmist   1\napple   0\nzzxqy   0\n"
    );
    assert_eq!(
        read(&out, "wiki-gut_scored.txt"),
        "apple   120\nrock   9\nrock   9\nmist   0\nzzxqy   0\n"
    );
    assert_eq!(
        read(&out, "wiki_scored.txt"),
        "apple   120\nrock   0\nmist   0\nzzxqy   0\nrock   0\n"
    );

    assert_eq!(
        read(&out, "0_SUMMARY.txt"),
        "brown corpora, analyzing 5 nouns,    assigned scores to 3 nouns\n\
         reuters corpora, analyzing 5 nouns,    assigned scores to 2 nouns\n\
         treebank corpora, analyzing 5 nouns,    assigned scores to 0 nouns\n\
         gutenberg corpora, analyzing 5 nouns,    assigned scores to 3 nouns\n\
         wiki-gut corpora, analyzing 5 nouns,    assigned scores to 3 nouns\n\
         wiki corpora, analyzing 5 nouns,    assigned scores to 1 nouns\n"
    );

    match &reports[4].outcome {
        SourceOutcome::Scored {
            total,
            nonzero,
            output,
        } => {
            assert_eq!(*total, 5);
            assert_eq!(*nonzero, 3);
            assert_eq!(output, &out.join("wiki-gut_scored.txt"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn end_to_end_single_file_source() {
    let (root, mut config) = fixture();
    fs::write(root.path().join("Nouns.txt"), "apple\nzzxqy\n").unwrap();
    config.sources = vec![SourceConfig::file(
        "wiki",
        root.path().join("freq_list/wikipedia_wordfreq.txt"),
    )];
    let out = config.output_dir.clone();

    compile_scores(config).unwrap();
    assert_eq!(read(&out, "wiki_scored.txt"), "apple   120\nzzxqy   0\n");
    assert_eq!(
        read(&out, "0_SUMMARY.txt"),
        "wiki corpora, analyzing 2 nouns,    assigned scores to 1 nouns\n"
    );
}

#[test]
fn repeated_runs_are_identical() {
    let (_root, config) = fixture();
    let out = config.output_dir.clone();
    let compiler = ScoreCompiler::new(config);

    compiler.compile().unwrap();
    let first = snapshot(&out);
    fs::write(out.join("leftover.txt"), "stale").unwrap();

    compiler.compile().unwrap();
    assert_eq!(snapshot(&out), first);
    assert!(!out.join("leftover.txt").exists());
}

fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files = fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            (
                entry.file_name().to_string_lossy().into_owned(),
                fs::read(entry.path()).unwrap(),
            )
        })
        .collect::<Vec<_>>();
    files.sort();
    files
}

#[test]
fn missing_word_list_aborts_before_output() {
    let (root, config) = fixture();
    fs::remove_file(root.path().join("Nouns.txt")).unwrap();
    let out = config.output_dir.clone();

    let err = compile_scores(config).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(!out.exists());
}

#[test]
fn unknown_corpus_aborts_the_run() {
    let (_root, mut config) = fixture();
    config
        .sources
        .insert(1, SourceConfig::corpus("webtext", TokenFormat::Plain));
    let out = config.output_dir.clone();

    let err = compile_scores(config).unwrap_err();
    assert!(matches!(err, Error::UnknownSource(ref name) if name == "webtext"));
    assert!(out.join("brown_scored.txt").exists());
    assert!(!out.join("reuters_scored.txt").exists());
}

#[test]
fn isolated_failures_skip_the_source() {
    let (_root, mut config) = fixture();
    config
        .sources
        .insert(1, SourceConfig::corpus("webtext", TokenFormat::Plain));
    config.isolate_failures = true;
    let out = config.output_dir.clone();

    let reports = compile_scores(config).unwrap();
    assert_eq!(reports.len(), 7);
    assert!(matches!(
        reports[1].outcome,
        SourceOutcome::Skipped { .. }
    ));
    assert!(out.join("wiki_scored.txt").exists());

    let summary = read(&out, "0_SUMMARY.txt");
    let lines = summary.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[1], "webtext corpora, skipped: unknown source: webtext");
}

#[test]
fn default_treebank_source_counts_leaves_once() {
    let (root, mut config) = fixture();
    let base = root.path();
    fs::write(base.join("Nouns.txt"), "pierre\nnnp\n").unwrap();

    let treebank = config.corpus_root.join("treebank");
    fs::remove_dir_all(&treebank).unwrap();
    for sub in ["combined", "parsed", "tagged", "raw"] {
        fs::create_dir_all(treebank.join(sub)).unwrap();
    }
    let tree = "( (S (NP-SBJ (NNP Pierre) (NNP Vinken) ) (VP (MD will) ) (. .) ))\n";
    fs::write(treebank.join("combined/wsj_0001.mrg"), tree).unwrap();
    fs::write(treebank.join("parsed/wsj_0001.prd"), tree).unwrap();
    fs::write(
        treebank.join("tagged/wsj_0001.pos"),
        "[ Pierre/NNP Vinken/NNP ]\nwill/MD ./.\n",
    )
    .unwrap();
    fs::write(treebank.join("raw/wsj_0001"), ".START \n\nPierre Vinken will.\n").unwrap();

    config.sources = Config::default()
        .sources
        .into_iter()
        .filter(|source| source.name == "treebank")
        .collect();
    let out = config.output_dir.clone();

    compile_scores(config).unwrap();
    assert_eq!(read(&out, "treebank_scored.txt"), "pierre   1\nnnp   0\n");
}

#[test]
fn invalid_utf8_frequency_line_does_not_abort() {
    let (root, mut config) = fixture();
    let list = root.path().join("freq_list/wiki.txt");
    fs::write(&list, b"caf\xe9 7\napple 120\nrock 4\n").unwrap();
    config.sources = vec![SourceConfig::file("wiki", &list)];
    let out = config.output_dir.clone();

    compile_scores(config).unwrap();
    assert_eq!(
        read(&out, "wiki_scored.txt"),
        "apple   120\nrock   4\nrock   4\nmist   0\nzzxqy   0\n"
    );
}

#[test]
fn invalid_utf8_word_is_dropped() {
    let (root, mut config) = fixture();
    fs::write(root.path().join("Nouns.txt"), b"apple\ncaf\xe9\nzzxqy\n").unwrap();
    config.sources = vec![SourceConfig::file(
        "wiki",
        root.path().join("freq_list/wikipedia_wordfreq.txt"),
    )];
    let out = config.output_dir.clone();

    compile_scores(config).unwrap();
    assert_eq!(read(&out, "wiki_scored.txt"), "apple   120\nzzxqy   0\n");
}

#[test]
fn unwritable_score_file_gets_one_summary_line() {
    let (root, mut config) = fixture();
    // Too long for a file name once `_scored.txt` is appended
    let name = "w".repeat(300);
    config.sources = vec![
        SourceConfig::file(&name, root.path().join("freq_list/wikipedia_wordfreq.txt")),
        SourceConfig::file("wiki", root.path().join("freq_list/wikipedia_wordfreq.txt")),
    ];
    config.isolate_failures = true;
    let out = config.output_dir.clone();

    let reports = compile_scores(config).unwrap();
    assert!(matches!(
        reports[0].outcome,
        SourceOutcome::Skipped { .. }
    ));

    let summary = read(&out, "0_SUMMARY.txt");
    let lines = summary.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&format!("{} corpora, skipped: ", name)));
    assert_eq!(
        lines[1],
        "wiki corpora, analyzing 5 nouns,    assigned scores to 1 nouns"
    );
}
