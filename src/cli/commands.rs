//! Command implementations for the tagbayes CLI.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};

use crate::analysis::analyzer::SimpleTextAnalyzer;
use crate::bayes::{SimpleTextClassifier, Tokenize};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClassifierConfig;

/// Largest number of tokens listed by `show-tag`.
const TOP_TOKENS: usize = 10;

/// Execute a CLI command.
pub fn execute_command(args: TagbayesArgs) -> anyhow::Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Untrain(train_args) => untrain(train_args, &args),
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::Tags(model_args) => list_tags(model_args, &args),
        Command::AddTag(tag_args) => add_tag(tag_args, &args),
        Command::RemoveTag(tag_args) => remove_tag(tag_args, &args),
        Command::RenameTag(rename_args) => rename_tag(rename_args, &args),
        Command::MergeTags(merge_args) => merge_tags(merge_args, &args),
        Command::ShowTag(tag_args) => show_tag(tag_args, &args),
    }
}

/// A classifier together with the analyzer it tokenizes with.
struct Session {
    analyzer: Arc<SimpleTextAnalyzer>,
    classifier: SimpleTextClassifier,
}

impl Session {
    /// Build an empty classifier from the global options.
    fn open(cli_args: &TagbayesArgs) -> anyhow::Result<Self> {
        let mut config = match &cli_args.config {
            Some(path) => ClassifierConfig::from_json_file(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => ClassifierConfig::default(),
        };
        if let Some(combiner) = cli_args.combiner {
            config.combiner = combiner.into();
        }

        let analyzer = Arc::new(SimpleTextAnalyzer::with_options(
            !cli_args.no_lowercase,
            cli_args.ignore.iter().cloned(),
        )?);
        let classifier = SimpleTextClassifier::with_config(analyzer.clone(), config)?;

        Ok(Self {
            analyzer,
            classifier,
        })
    }

    /// Load the model at `path`, which must exist.
    fn load(cli_args: &TagbayesArgs, path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            bail!("model {} does not exist", path.display());
        }
        Self::load_or_empty(cli_args, path)
    }

    /// Load the model at `path`, or start an empty one if there is no file.
    fn load_or_empty(cli_args: &TagbayesArgs, path: &Path) -> anyhow::Result<Self> {
        let mut session = Self::open(cli_args)?;
        if path.exists() {
            session
                .classifier
                .load(path)
                .with_context(|| format!("failed to load model {}", path.display()))?;
        } else {
            log::info!("starting new model at {}", path.display());
        }
        Ok(session)
    }

    fn save(&self, path: &Path) -> anyhow::Result<()> {
        self.classifier
            .save(path)
            .with_context(|| format!("failed to save model {}", path.display()))?;
        Ok(())
    }

    /// Tokenize inline text or the contents of a file.
    fn tokens(&self, source: &TextSource) -> anyhow::Result<Vec<String>> {
        match (&source.text, &source.file) {
            (Some(text), _) => Ok(self.analyzer.tokenize(text)?),
            (None, Some(file)) => {
                let bytes = std::fs::read(file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                self.analyzer
                    .tokenize_bytes(&bytes)
                    .with_context(|| format!("failed to tokenize {}", file.display()))
            }
            (None, None) => bail!("no text given"),
        }
    }

    fn update_result(&self, path: &Path, action: String) -> ModelUpdateResult {
        ModelUpdateResult {
            model: path.to_string_lossy().to_string(),
            action,
            tags: self.classifier.store().len(),
        }
    }
}

/// Train a tag, creating the model if needed.
fn train(args: &TrainArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let path = args.model.model.as_path();
    let mut session = Session::load_or_empty(cli_args, path)?;

    let tokens = session.tokens(&args.source)?;
    let count = tokens.len();
    session.classifier.train_tokens(args.tag.clone(), tokens);
    session.save(path)?;

    output_result(
        "Training complete",
        &session.update_result(path, format!("trained '{}' with {count} tokens", args.tag)),
        cli_args,
    )?;
    Ok(())
}

/// Untrain a tag.
fn untrain(args: &TrainArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let path = args.model.model.as_path();
    let mut session = Session::load(cli_args, path)?;

    let tokens = session.tokens(&args.source)?;
    let count = tokens.len();
    let action = if session.classifier.untrain_tokens(&args.tag, tokens) {
        session.save(path)?;
        format!("untrained '{}' by {count} tokens", args.tag)
    } else {
        log::warn!("tag '{}' does not exist, nothing untrained", args.tag);
        format!("tag '{}' does not exist", args.tag)
    };

    output_result(
        "Untraining complete",
        &session.update_result(path, action),
        cli_args,
    )?;
    Ok(())
}

/// Classify text against a model.
fn classify(args: &ClassifyArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let path = args.model.model.as_path();
    let mut session = Session::load(cli_args, path)?;

    let tokens = session.tokens(&args.source)?;
    let scores = session.classifier.classify_tokens(&tokens)?;
    let limit = args.limit.unwrap_or(usize::MAX);

    let result = ClassificationResult {
        combiner: session.classifier.combiner_name().to_string(),
        tokens: tokens.len(),
        scores: scores
            .into_iter()
            .take(limit)
            .map(|(tag, score)| TagScore { tag, score })
            .collect(),
    };

    output_result("Classification results", &result, cli_args)?;
    Ok(())
}

/// List the tags of a model.
fn list_tags(args: &ModelArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let session = Session::load(cli_args, &args.model)?;
    let tags = session
        .classifier
        .tag_ids()
        .into_iter()
        .cloned()
        .collect();

    output_result("Tags", &TagList { tags }, cli_args)?;
    Ok(())
}

/// Create an empty tag.
fn add_tag(args: &TagArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let path = args.model.model.as_path();
    let mut session = Session::load_or_empty(cli_args, path)?;

    session.classifier.add_tag(args.tag.clone());
    session.save(path)?;

    output_result(
        "Tag added",
        &session.update_result(path, format!("added '{}'", args.tag)),
        cli_args,
    )?;
    Ok(())
}

/// Remove a tag.
fn remove_tag(args: &TagArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let path = args.model.model.as_path();
    let mut session = Session::load(cli_args, path)?;

    let action = if session.classifier.remove_tag(&args.tag) {
        session.save(path)?;
        format!("removed '{}'", args.tag)
    } else {
        log::warn!("tag '{}' does not exist", args.tag);
        format!("tag '{}' does not exist", args.tag)
    };

    output_result("Tag removed", &session.update_result(path, action), cli_args)?;
    Ok(())
}

/// Rename a tag.
fn rename_tag(args: &RenameTagArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let path = args.model.model.as_path();
    let mut session = Session::load(cli_args, path)?;

    session
        .classifier
        .rename_tag(&args.old, args.new.clone())
        .with_context(|| format!("failed to rename '{}' to '{}'", args.old, args.new))?;
    session.save(path)?;

    output_result(
        "Tag renamed",
        &session.update_result(path, format!("renamed '{}' to '{}'", args.old, args.new)),
        cli_args,
    )?;
    Ok(())
}

/// Merge one tag into another.
fn merge_tags(args: &MergeTagsArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let path = args.model.model.as_path();
    let mut session = Session::load(cli_args, path)?;

    session
        .classifier
        .merge_tags(&args.source, &args.dest)
        .with_context(|| format!("failed to merge '{}' into '{}'", args.source, args.dest))?;
    session.save(path)?;

    output_result(
        "Tags merged",
        &session.update_result(
            path,
            format!("merged '{}' into '{}'", args.source, args.dest),
        ),
        cli_args,
    )?;
    Ok(())
}

/// Show the statistics of one tag.
fn show_tag(args: &TagArgs, cli_args: &TagbayesArgs) -> anyhow::Result<()> {
    let session = Session::load(cli_args, &args.model.model)?;
    let Some(counter) = session.classifier.get_tag(&args.tag) else {
        bail!("tag '{}' does not exist", args.tag);
    };

    let mut top_tokens: Vec<TokenWeight> = counter
        .iter()
        .map(|(token, count)| TokenWeight {
            token: token.clone(),
            count,
        })
        .collect();
    top_tokens.sort_by(|a, b| {
        b.count
            .total_cmp(&a.count)
            .then_with(|| a.token.cmp(&b.token))
    });
    top_tokens.truncate(TOP_TOKENS);

    let info = TagInfo {
        tag: args.tag.clone(),
        train_count: counter.train_count(),
        token_count: counter.token_count(),
        distinct_tokens: counter.len(),
        top_tokens,
    };

    output_result("Tag statistics", &info, cli_args)?;
    Ok(())
}
