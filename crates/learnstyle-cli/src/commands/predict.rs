//! Predict command: answers supplied as flags.

use crate::error::Result;
use crate::output;
use clap::Args;
use learnstyle::features::{AnswerSet, RawAnswers};
use std::path::Path;

/// The eleven questionnaire answers as command-line flags.
#[derive(Args, Debug, Clone)]
pub(crate) struct AnswerArgs {
    /// Making notes or mind-maps while studying (1-5)
    #[arg(long, value_name = "1-5")]
    pub catatan: String,
    /// Understanding from diagrams, pictures and colour (1-5)
    #[arg(long, value_name = "1-5")]
    pub diagram: String,
    /// Reading text or books as the main source (1-5)
    #[arg(long, value_name = "1-5")]
    pub baca: String,
    /// Understanding spoken explanations (1-5)
    #[arg(long, value_name = "1-5")]
    pub mendengarkan: String,
    /// Enjoys discussion or speaking up in class (ya/tidak)
    #[arg(long, value_name = "ya|tidak")]
    pub diskusi: String,
    /// Using audio recordings or podcasts (1-5)
    #[arg(long, value_name = "1-5")]
    pub rekaman: String,
    /// Enjoys hands-on practice or experiments (ya/tidak)
    #[arg(long, value_name = "ya|tidak")]
    pub praktik: String,
    /// Understanding better after trying it yourself (1-5)
    #[arg(long, value_name = "1-5")]
    pub mencoba: String,
    /// Getting bored sitting still (1-5)
    #[arg(long, value_name = "1-5")]
    pub bosan: String,
    /// Attending class or study sessions (1-5)
    #[arg(long, value_name = "1-5")]
    pub hadir: String,
    /// Taking part in class or group activities (1-5)
    #[arg(long, value_name = "1-5")]
    pub aktif: String,
}

impl AnswerArgs {
    fn parse(&self) -> Result<AnswerSet> {
        let raw = RawAnswers {
            catatan: self.catatan.clone(),
            diagram: self.diagram.clone(),
            baca: self.baca.clone(),
            mendengarkan: self.mendengarkan.clone(),
            diskusi: self.diskusi.clone(),
            rekaman: self.rekaman.clone(),
            praktik: self.praktik.clone(),
            mencoba: self.mencoba.clone(),
            bosan: self.bosan.clone(),
            hadir: self.hadir.clone(),
            aktif: self.aktif.clone(),
        };
        Ok(raw.parse()?)
    }
}

/// Run the predict command
pub(crate) fn run(
    artifacts: &Path,
    version: Option<&str>,
    answers: &AnswerArgs,
    log: Option<&Path>,
    json: bool,
) -> Result<()> {
    // Reject bad answers before touching the artifact directory.
    let answers = answers.parse()?;
    let predictor = super::open_predictor(artifacts, version)?;
    let result = predictor.predict_answers(&answers)?;

    super::maybe_log(log, &answers, &result)?;
    output::prediction(&result, predictor.version(), json)?;
    Ok(())
}
