//! Ask command: interactive questionnaire.

use crate::error::{CliError, Result};
use crate::output;
use learnstyle::features::{AnswerKind, AnswerSet, Likert, Question, RawAnswers, YesNo, QUESTIONS};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Run the ask command
pub(crate) fn run(artifacts: &Path, version: Option<&str>, log: Option<&Path>, json: bool) -> Result<()> {
    // Load first so a missing model is reported before any question.
    let predictor = super::open_predictor(artifacts, version)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let answers = collect_answers(&mut input, &mut out)?;

    let result = predictor.predict_answers(&answers)?;
    super::maybe_log(log, &answers, &result)?;
    output::prediction(&result, predictor.version(), json)?;
    Ok(())
}

fn hint(q: &Question) -> &'static str {
    match q.kind {
        AnswerKind::Likert => "(1-5)",
        AnswerKind::YesNo => "(ya/tidak)",
    }
}

fn check(q: &Question, raw: &str) -> learnstyle::Result<()> {
    match q.kind {
        AnswerKind::Likert => Likert::parse(q.field, raw).map(drop),
        AnswerKind::YesNo => YesNo::parse(q.field, raw).map(drop),
    }
}

/// Asks every question in order, repeating one until its answer is valid.
pub(crate) fn collect_answers<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<AnswerSet> {
    let mut raw = RawAnswers::default();

    for (i, q) in QUESTIONS.iter().enumerate() {
        let answer = loop {
            write!(out, "{:>2}. {} {}: ", i + 1, q.prompt, hint(q))?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(CliError::InvalidInput(format!(
                    "input ended before question '{}' was answered",
                    q.field
                )));
            }
            let line = line.trim().to_string();
            match check(q, &line) {
                Ok(()) => break line,
                Err(e) => {
                    tracing::debug!(field = q.field, value = %line, "answer rejected");
                    writeln!(out, "    {e}")?;
                }
            }
        };

        if let Some(slot) = raw.slot_mut(q.field) {
            *slot = answer;
        }
    }

    output::info("All questions answered.");
    Ok(raw.parse()?)
}
