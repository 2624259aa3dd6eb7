use std::sync::Arc;
use std::thread;

use tagbayes::analysis::analyzer::SimpleTextAnalyzer;
use tagbayes::bayes::{
    self, RobinsonCombiner, RobinsonFisherCombiner, SharedClassifier, SimpleTextClassifier,
};
use tagbayes::config::ClassifierConfig;
use tagbayes::error::{Result, TagbayesError};
use tempfile::TempDir;

const EPSILON: f64 = 1e-10;

fn tag(id: &str) -> String {
    id.to_string()
}

fn assert_score(scores: &bayes::Scores<String>, id: &str, expected: f64) {
    let actual = scores
        .get(id)
        .copied()
        .unwrap_or_else(|| panic!("no score for tag '{id}' in {scores:?}"));
    assert!(
        (actual - expected).abs() < EPSILON,
        "tag '{id}': expected {expected}, got {actual}"
    );
}

fn top_tag(classifier: &mut SimpleTextClassifier, input: &str) -> Result<String> {
    let scores = classifier.classify(input)?;
    Ok(scores
        .keys()
        .next()
        .cloned()
        .unwrap_or_else(|| panic!("no scores for {input:?}")))
}

#[test]
fn single_discriminating_token_scores_its_tag_only() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("span"), "bad")?;
    classifier.train(tag("ham"), "good")?;

    let scores = classifier.classify("this is a bad sentence")?;
    assert_eq!(scores.len(), 1);
    assert_score(&scores, "span", 0.9999);
    Ok(())
}

#[test]
fn language_discovery() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("french"), "le la les du un une je il elle de en")?;
    classifier.train(tag("german"), "der die das ein eine")?;
    classifier.train(tag("spanish"), "el uno una las de la en")?;
    classifier.train(tag("english"), "the it she he they them are were to")?;
    classifier.train(tag("english"), "the rain in spain falls mainly on the plain")?;

    let scores = classifier.classify("uno das je de la elle in")?;
    assert_eq!(scores.len(), 4);
    assert_score(&scores, "english", 0.9999);
    assert_score(&scores, "german", 0.9999);
    assert_score(&scores, "french", 0.672_850_065_235_935_4);
    assert_score(&scores, "spanish", 0.580_779_052_322_716);

    let values: Vec<f64> = scores.values().copied().collect();
    assert!(values.windows(2).all(|w| w[0] >= w[1]));
    Ok(())
}

#[test]
fn robinson_and_robinson_fisher_disagree_on_strength() -> Result<()> {
    let mut robinson = bayes::new_simple_text()?;
    robinson.train(tag("Alimentação"), "Ipiranga AMPM")?;
    robinson.train(tag("Alimentação"), "Restaurante Bobs")?;
    robinson.train(tag("Combustível"), "Posto Ipiranga")?;

    let scores = robinson.classify("Restaurante Ipiranga")?;
    assert_eq!(scores.len(), 2);
    assert_score(&scores, "Alimentação", 0.844_159_615_839_621_6);
    assert_score(&scores, "Combustível", 0.333_333_333_333_333_26);

    let mut fisher = bayes::new_simple_text_with(
        SimpleTextAnalyzer::new()?,
        Box::new(RobinsonFisherCombiner::new()),
    );
    fisher.train(tag("Alimentação"), "IPIRANGA AMPM")?;
    fisher.train(tag("Alimentação"), "Restaurante Bobs")?;
    fisher.train(tag("Combustível"), "Posto Ipiranga")?;

    let scores = fisher.classify("Restaurante Ipiranga")?;
    assert_eq!(scores.len(), 2);
    assert_score(&scores, "Alimentação", 0.994_811_850_890_825_1);
    assert_score(&scores, "Combustível", 0.381_280_345_408_630_15);
    Ok(())
}

#[test]
fn cats_and_dogs() -> Result<()> {
    let analyzer = SimpleTextAnalyzer::with_options(true, ["the", "my", "i", "dont"])?;
    let mut classifier = bayes::new_simple_text_with(analyzer, Box::new(RobinsonCombiner::new()));

    let training = [
        ("dog", "Dogs are awesome, cats too. I love my dog"),
        (
            "cat",
            "Cats are more preferred by software developers. I never could stand cats. I have a dog",
        ),
        (
            "dog",
            "My dog's name is Willy. He likes to play with my wife's cat all day long. I love dogs",
        ),
        (
            "cat",
            "Cats are difficult animals, unlike dogs, really annoying, I hate them all",
        ),
        ("dog", "So which one should you choose? A dog, definitely."),
        (
            "cat",
            "The favorite food for cats is bird meat, although mice are good, but birds are a delicacy",
        ),
        ("dog", "A dog will eat anything, including birds or whatever meat"),
        ("cat", "My cat's favorite place to purr is on my keyboard"),
        (
            "dog",
            "My dog's favorite place to take a leak is the tree in front of our house",
        ),
    ];
    for (id, text) in training {
        classifier.train(tag(id), text)?;
    }

    let expectations = [
        ("This test is about cats.", "cat"),
        ("I hate ...", "cat"),
        ("The most annoying animal on earth.", "cat"),
        ("My precious, my favorite!", "cat"),
        ("Get off my keyboard!", "cat"),
        ("Kill that bird!", "cat"),
        ("This test is about dogs.", "dog"),
        ("Cats or Dogs?", "dog"),
        ("What pet will I love more?", "dog"),
        ("Willy, where the heck are you?", "cat"),
        ("Why is the front door of our house open?", "dog"),
    ];
    for (input, expected) in expectations {
        assert_eq!(top_tag(&mut classifier, input)?, expected, "input {input:?}");
    }

    let scores = classifier.classify("The preferred company of software developers.")?;
    assert_eq!(scores.len(), 2);
    assert_score(&scores, "cat", 0.9999);
    assert_score(&scores, "dog", 0.9999);
    Ok(())
}

#[test]
fn added_tag_is_visible() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.add_tag(tag("teste"));
    let counter = classifier.get_tag(&tag("teste")).expect("tag exists");
    assert!(counter.is_empty());
    assert_eq!(counter.train_count(), 0);
    Ok(())
}

#[test]
fn removed_tag_is_gone() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("teste"), "Bla")?;
    assert!(classifier.get_tag(&tag("teste")).is_some());

    assert!(classifier.remove_tag(&tag("teste")));
    assert!(classifier.get_tag(&tag("teste")).is_none());
    assert!(!classifier.remove_tag(&tag("teste")));
    Ok(())
}

#[test]
fn renamed_tag_keeps_its_counts() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("teste"), "Bla")?;
    assert!(classifier.get_tag(&tag("teste2")).is_none());

    classifier.rename_tag(&tag("teste"), tag("teste2"))?;
    assert!(classifier.get_tag(&tag("teste")).is_none());
    let renamed = classifier.get_tag(&tag("teste2")).expect("renamed tag");
    assert_eq!(renamed.get(&tag("bla")), 1.0);

    let err = classifier
        .rename_tag(&tag("missing"), tag("other"))
        .unwrap_err();
    assert!(matches!(err, TagbayesError::NotFound(_)));
    Ok(())
}

#[test]
fn merged_tags_score_as_one() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("bom"), "gordo")?;
    classifier.train(tag("mal"), "magro")?;

    let scores = classifier.classify("gordo magro")?;
    assert_eq!(scores.len(), 2);
    assert_score(&scores, "bom", 0.9999);
    assert_score(&scores, "mal", 0.9999);

    classifier.merge_tags(&tag("mal"), &tag("bom"))?;
    let scores = classifier.classify("gordo magro")?;
    assert_eq!(scores.len(), 1);
    assert_score(&scores, "bom", 0.9999);

    let err = classifier.merge_tags(&tag("bom"), &tag("bom")).unwrap_err();
    assert!(matches!(err, TagbayesError::InvalidArgument(_)));
    Ok(())
}

#[test]
fn saved_model_classifies_the_same_after_load() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bayes.json");

    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("teste"), "Afonso França")?;
    classifier.save(&path)?;

    let scores = classifier.classify("Afonso França")?;
    assert_eq!(scores.len(), 1);
    assert_score(&scores, "teste", 0.9999);

    let mut loaded = bayes::new_simple_text()?;
    loaded.load(&path)?;
    let scores = loaded.classify("Afonso França")?;
    assert_eq!(scores.len(), 1);
    assert_score(&scores, "teste", 0.9999);
    assert_eq!(loaded.export_state(), classifier.export_state());
    Ok(())
}

#[test]
fn exported_state_classifies_the_same_in_a_fresh_classifier() -> Result<()> {
    let mut trained = bayes::new_simple_text()?;
    trained.train(tag("french"), "le la les du un une je il elle de en")?;
    trained.train(tag("german"), "der die das ein eine")?;
    trained.train(tag("spanish"), "el uno una las de la en")?;
    trained.train(tag("english"), "the it she he they them are were to")?;

    let mut fresh = bayes::new_simple_text_with(
        SimpleTextAnalyzer::new()?,
        Box::new(RobinsonCombiner::new()),
    );
    assert!(fresh.tag_ids().is_empty());
    fresh.import_state(trained.export_state());
    assert!(!fresh.is_cache_fresh());

    let input = "uno das je de la elle in";
    let expected = trained.classify(input)?;
    let actual = fresh.classify(input)?;
    assert!(!actual.is_empty());
    assert_eq!(actual, expected);
    assert_eq!(
        actual.keys().collect::<Vec<_>>(),
        expected.keys().collect::<Vec<_>>()
    );

    // The import is a copy: training the fresh classifier leaves the source alone.
    fresh.train(tag("german"), "und")?;
    assert!(!trained.get_tag(&tag("german")).expect("tag").contains(&tag("und")));
    Ok(())
}

#[test]
fn saved_model_uses_the_documented_json_shape() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("teste"), "Afonso França")?;

    let value: serde_json::Value = serde_json::from_str(&classifier.export_json()?)?;
    assert_eq!(value["Items"]["teste"]["TrainCount"], 1);
    assert_eq!(value["Items"]["teste"]["TokenCount"], 2);
    assert_eq!(value["Items"]["teste"]["Items"]["frança"], 1.0);
    assert_eq!(value["SystemTag"]["TokenCount"], 2);
    Ok(())
}

#[test]
fn loading_garbage_fails_and_keeps_state() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("teste"), "Afonso")?;

    assert!(classifier.import_json("{ not json").is_err());
    assert!(classifier.get_tag(&tag("teste")).is_some());
    Ok(())
}

#[test]
fn untrained_token_stops_scoring() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("teste"), "Afonso França")?;
    classifier.untrain(&tag("teste"), "França")?;

    let scores = classifier.classify("França")?;
    assert!(scores.is_empty());

    let counter = classifier.get_tag(&tag("teste")).expect("tag survives");
    assert!(!counter.contains(&tag("frança")));
    assert_eq!(counter.get(&tag("afonso")), 1.0);
    Ok(())
}

#[test]
fn untraining_unknown_tag_is_ignored() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("teste"), "Afonso")?;
    let before = classifier.export_state();

    classifier.untrain(&tag("missing"), "Afonso")?;
    assert_eq!(classifier.export_state(), before);
    Ok(())
}

#[test]
fn tag_ids_are_sorted() -> Result<()> {
    let mut classifier = bayes::new_simple_text()?;
    classifier.train(tag("teste1"), "Afonso França")?;
    classifier.train(tag("teste"), "Afonso França")?;

    assert_eq!(classifier.tag_ids(), vec!["teste", "teste1"]);
    Ok(())
}

#[test]
fn config_changes_cut_off() -> Result<()> {
    let config = ClassifierConfig {
        threshold: 0.5,
        ..ClassifierConfig::default()
    };
    let mut classifier =
        SimpleTextClassifier::with_config(Arc::new(SimpleTextAnalyzer::new()?), config)?;
    classifier.train(tag("a"), "shared only")?;
    classifier.train(tag("b"), "shared")?;

    // Only probabilities of exactly 0 or 1 survive a 0.5 threshold.
    let scores = classifier.classify("shared only")?;
    assert_eq!(scores.len(), 1);
    assert_score(&scores, "a", 0.9999);

    let invalid = ClassifierConfig {
        tolerance: 0.0,
        ..ClassifierConfig::default()
    };
    let err = SimpleTextClassifier::with_config(Arc::new(SimpleTextAnalyzer::new()?), invalid)
        .unwrap_err();
    assert!(matches!(err, TagbayesError::Config(_)));
    Ok(())
}

#[test]
fn shared_classifier_serves_concurrent_readers() -> Result<()> {
    let shared = Arc::new(SharedClassifier::new(bayes::new_simple_text()?));
    shared.train(tag("spam"), "cheap pills")?;
    shared.train(tag("ham"), "team lunch")?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || shared.classify("cheap pills"))
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.join().expect("reader thread panicked")?);
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(results[0].len(), 1);
    assert_score(&results[0], "spam", 0.9999);
    Ok(())
}
