mod fields;
mod prompt;
mod render;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use ckd_ai::{Classifier, DEFAULT_MODEL_PATH, load_classifier};
use ckd_core::{FeatureVector, Form, PredictionResult, Submission};
use clap::{Args, Parser, Subcommand};
use tracing::{Level, debug};

use crate::fields::FieldArgs;

#[derive(Debug, Parser)]
#[command(
    name = "ckd",
    version,
    about = "Chronic kidney disease screening from clinical measurements"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Describe the form controls
    Form {
        /// Print the form as JSON for an external renderer
        #[arg(long)]
        json: bool,
    },

    /// Submit the form and print the prediction
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Classifier artifact (.json, or .onnx with the `onnx` feature)
    #[arg(long, env = "CKD_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// JSON object of field -> value; `-` reads stdin
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Prompt for each field not given by flags or the input file
    #[arg(short, long)]
    interactive: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    fields: FieldArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    debug!("ckd v{}", env!("CARGO_PKG_VERSION"));

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Form { json } => {
            let form = Form::ckd();
            if json {
                render::form_json(&form, &mut stdout)?;
            } else {
                render::form(&form, &mut stdout)?;
            }
        }
        Command::Predict(args) => predict(args, &mut stdout)?,
    }
    Ok(())
}

fn predict<W: io::Write>(args: PredictArgs, out: &mut W) -> anyhow::Result<()> {
    // Loaded before any input is read: a missing model ends the session.
    let classifier = load_classifier(&args.model)?;
    let form = Form::ckd();

    let mut submission = match &args.input {
        Some(path) => read_submission(path)?,
        None => Submission::new(),
    };
    submission.merge(args.fields.submission());

    if args.interactive {
        let stdin = io::stdin();
        prompt::fill(&form, &mut submission, &mut stdin.lock(), &mut io::stderr())
            .context("reading interactive input")?;
    }

    let result = screen(classifier.as_ref(), &form, &submission)?;
    if args.json {
        render::result_json(&result, out)?;
    } else {
        render::result(&result, out)?;
    }
    Ok(())
}

fn read_submission(path: &Path) -> anyhow::Result<Submission> {
    let reader: Box<dyn Read> = if path.as_os_str() == "-" {
        Box::new(io::stdin())
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Box::new(BufReader::new(file))
    };
    Submission::from_reader(reader).with_context(|| format!("reading {}", path.display()))
}

/// One encode-predict-advise cycle.
fn screen(
    classifier: &dyn Classifier,
    form: &Form,
    submission: &Submission,
) -> anyhow::Result<PredictionResult> {
    let record = form.collect(submission)?;
    let features = FeatureVector::encode(&record);
    let label = classifier
        .predict(&features)
        .with_context(|| format!("running classifier '{}'", classifier.name()))?;
    debug!(%label, "prediction");
    Ok(PredictionResult::new(&record, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ckd_ai::ModelError;
    use ckd_core::{FEATURE_ORDER, Label, advice};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Returns a fixed label and remembers the vectors it saw.
    struct Fixed {
        label: Label,
        seen: Mutex<Vec<FeatureVector>>,
    }

    impl Fixed {
        fn new(label: Label) -> Self {
            Self {
                label,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError> {
            self.seen.lock().unwrap().push(*features);
            Ok(self.label)
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn predict(&self, _: &FeatureVector) -> Result<Label, ModelError> {
            Err(ModelError::InvalidLabel(7))
        }
    }

    fn rendered(result: &PredictionResult) -> String {
        let mut out = Vec::new();
        render::result(result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn older_hypertensive_patient_without_ckd() {
        let submission = Submission::new()
            .with("age", 65u32)
            .with("blood_pressure", 150u32)
            .with("blood_glucose_random", 130u32)
            .with("hypertension", "yes");
        let classifier = Fixed::new(Label::NotCkd);

        let result = screen(&classifier, &Form::ckd(), &submission).unwrap();
        assert_eq!(result.label, Label::NotCkd);
        for line in [
            advice::AGE_CHECKUP,
            advice::AGE_MONITORING,
            advice::BLOOD_PRESSURE,
            advice::HYPERTENSION,
        ] {
            assert!(result.advice.iter().any(|a| a == line), "missing {line:?}");
        }
        assert!(!result.advice.iter().any(|a| a == advice::GLUCOSE));
        let tail: Vec<&str> = result.advice[result.advice.len() - 4..]
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(tail, advice::GENERAL);
    }

    #[test]
    fn quiet_patient_with_ckd_prints_only_the_label() {
        let mut submission = Submission::new()
            .with("age", 30u32)
            .with("blood_pressure", 100u32)
            .with("appetite", "good");
        for field in [
            "hypertension",
            "diabetes_mellitus",
            "coronary_artery_disease",
            "pedal_edema",
            "anemia",
        ] {
            submission.insert(field, "no");
        }
        for field in ["red_blood_cells", "pus_cell"] {
            submission.insert(field, "normal");
        }
        for field in ["pus_cell_clumps", "bacteria"] {
            submission.insert(field, "notpresent");
        }

        let result = screen(&Fixed::new(Label::Ckd), &Form::ckd(), &submission).unwrap();
        assert_eq!(rendered(&result), "Prediction: CKD\n");
    }

    #[test]
    fn classifier_sees_the_encoded_vector() {
        let classifier = Fixed::new(Label::Ckd);
        let submission = Submission::new()
            .with("age", 72u32)
            .with("sugar", "3")
            .with("bacteria", "present")
            .with("anemia", "no");
        screen(&classifier, &Form::ckd(), &submission).unwrap();

        let seen = classifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let v = seen[0];
        assert_eq!(v.as_slice().len(), FEATURE_ORDER.len());
        assert_eq!(v.get("age"), Some(72.0));
        assert_eq!(v.get("sugar"), Some(3.0));
        assert_eq!(v.get("bacteria"), Some(0.0));
        assert_eq!(v.get("anemia"), Some(0.0));
        assert_eq!(v.get("hypertension"), Some(1.0));
    }

    #[test]
    fn identical_submissions_give_identical_results() {
        let classifier = Fixed::new(Label::NotCkd);
        let submission = Submission::new().with("age", 61u32).with("diabetes_mellitus", "no");
        let form = Form::ckd();

        let first = screen(&classifier, &form, &submission).unwrap();
        let second = screen(&classifier, &form, &submission).unwrap();
        assert_eq!(first, second);

        let seen = classifier.seen.lock().unwrap();
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn invalid_submission_never_reaches_the_classifier() {
        let classifier = Fixed::new(Label::Ckd);
        let submission = Submission::new().with("age", 151u32);

        assert!(screen(&classifier, &Form::ckd(), &submission).is_err());
        assert!(classifier.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn inference_errors_propagate() {
        let err = screen(&Broken, &Form::ckd(), &Submission::new()).unwrap_err();
        assert!(format!("{err:#}").contains("model returned label 7"));
    }

    fn predict_args(model: PathBuf) -> PredictArgs {
        PredictArgs {
            model,
            input: None,
            interactive: false,
            json: false,
            fields: FieldArgs::default(),
        }
    }

    fn write_model(dir: &TempDir, intercept: f64) -> PathBuf {
        let path = dir.path().join("Chronic_kidney_disease.json");
        let model = serde_json::json!({
            "name": "constant",
            "feature_names": FEATURE_ORDER,
            "coefficients": vec![0.0; FEATURE_ORDER.len()],
            "intercept": intercept,
        });
        std::fs::write(&path, model.to_string()).unwrap();
        path
    }

    #[test]
    fn missing_model_halts_before_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Chronic_kidney_disease.json");
        let mut args = predict_args(path.clone());
        args.input = Some(dir.path().join("never-read.json"));

        let mut out = Vec::new();
        let err = predict(args, &mut out).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Model file '{}' not found.", path.display())
        );
        assert!(out.is_empty());
    }

    #[test]
    fn flags_override_input_file() {
        let dir = TempDir::new().unwrap();
        let model = write_model(&dir, -5.0);
        let input = dir.path().join("patient.json");
        std::fs::write(&input, r#"{"age": 40, "anemia": "yes"}"#).unwrap();

        let mut args = predict_args(model);
        args.input = Some(input);
        args.json = true;
        args.fields.age = Some(70.0);

        let mut out = Vec::new();
        predict(args, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["label"], "Not CKD");
        let advice: Vec<&str> = value["advice"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|a| a.as_str())
            .collect();
        assert!(advice.contains(&advice::AGE_CHECKUP), "age 70 from the flag wins");
        assert!(advice.contains(&advice::ANEMIA), "anemia from the file is kept");
    }

    #[test]
    fn malformed_input_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let model = write_model(&dir, 5.0);
        let input = dir.path().join("patient.json");
        std::fs::write(&input, "age=40").unwrap();

        let mut args = predict_args(model);
        args.input = Some(input);

        let err = predict(args, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("malformed submission"));
    }

    #[test]
    fn text_output_for_ckd() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        predict(predict_args(write_model(&dir, 5.0)), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Prediction: CKD\n");
    }

    #[test]
    fn cli_parses_predict_flags() {
        let cli = Cli::parse_from([
            "ckd",
            "-v",
            "predict",
            "--model",
            "m.json",
            "--age",
            "65",
            "--hypertension",
            "yes",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.model, PathBuf::from("m.json"));
                assert_eq!(args.fields.age, Some(65.0));
                assert_eq!(args.fields.hypertension.as_deref(), Some("yes"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
