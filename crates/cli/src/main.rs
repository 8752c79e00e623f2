use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use facemark_core::annotation::domain::annotation_style::AnnotationStyle;
use facemark_core::annotation::infrastructure::cpu_annotator::CpuAnnotator;
use facemark_core::detection::domain::detector_settings::DetectorSettings;
use facemark_core::detection::infrastructure::model_resolver::{self, ModelSource};
use facemark_core::detection::infrastructure::onnx_landmark_detector::OnnxLandmarkDetector;
use facemark_core::detection::infrastructure::seeta_face_detector::SeetaFaceDetector;
use facemark_core::imaging::domain::image_writer::ImageWriter;
use facemark_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facemark_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facemark_core::imaging::infrastructure::viewer_image_writer::ViewerImageWriter;
use facemark_core::pipeline::align_image_use_case::{AlignError, AlignImageUseCase, AlignOutcome};
use facemark_core::pipeline::alignment_report::AlignmentReport;
use facemark_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use facemark_core::shared::constants::{
    ALIGNMENT_MODEL_NAME, DEFAULT_INPUT_IMAGE, DEFAULT_MODEL_DIR, DEFAULT_OUTPUT_IMAGE,
    DETECTION_MODEL_NAME, DETECTION_MODEL_URL,
};

/// Returned for a bad option or option argument and for an unreadable image.
const EXIT_BAD_INPUT: i32 = -1;

/// Returned when invoked without arguments and for runtime failures.
const EXIT_FAILURE: i32 = 1;

/// Detect a face and draw its bounding box and five facial landmarks.
#[derive(Parser, Debug)]
#[command(name = "facemark")]
struct Cli {
    /// Input image for face alignment.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_INPUT_IMAGE)]
    input: PathBuf,

    /// Output image with the face box and landmarks drawn.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_IMAGE)]
    output: PathBuf,

    /// Directory holding the detection and alignment models.
    #[arg(short, long, value_name = "MODEL_PATH", default_value = DEFAULT_MODEL_DIR)]
    model: PathBuf,

    /// Show the result in the image viewer instead of saving it.
    #[arg(long)]
    show: bool,

    /// Annotate every detected face, not just the first.
    #[arg(long)]
    all_faces: bool,

    /// Also write a JSON report of boxes and landmarks.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Smallest face size to search for, in pixels (>= 20).
    #[arg(long, default_value = "40")]
    min_face_size: u32,

    /// Largest face size to search for, in pixels (0 = no limit).
    #[arg(long, default_value = "0")]
    max_face_size: u32,

    /// Cascade score a window needs to count as a face.
    #[arg(long, default_value = "2.0")]
    score_thresh: f64,

    /// Image pyramid down-scaling factor (0.01-0.99).
    #[arg(long, default_value = "0.8")]
    pyramid_scale: f32,

    /// Sliding window step in pixels, both axes.
    #[arg(long, default_value = "4")]
    window_step: u32,

    /// Landmark dot radius in pixels.
    #[arg(long, default_value = "2")]
    landmark_radius: u32,

    /// Bounding box line thickness in pixels.
    #[arg(long, default_value = "1")]
    box_thickness: u32,

    /// Never download a missing model.
    #[arg(long)]
    offline: bool,
}

impl Cli {
    fn detector_settings(&self) -> DetectorSettings {
        DetectorSettings {
            min_face_size: self.min_face_size,
            max_face_size: self.max_face_size,
            score_thresh: self.score_thresh,
            pyramid_scale_factor: self.pyramid_scale,
            window_step: (self.window_step, self.window_step),
        }
    }

    fn annotation_style(&self) -> AnnotationStyle {
        AnnotationStyle {
            landmark_radius: self.landmark_radius,
            box_thickness: self.box_thickness,
            ..AnnotationStyle::default()
        }
    }
}

fn main() {
    env_logger::init();

    if std::env::args_os().len() < 2 {
        eprintln!("{}", Cli::command().render_help());
        process::exit(EXIT_FAILURE);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(parse_error_exit_code(e.kind()));
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(exit_code(e.as_ref()));
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(&cli)?;

    let detection_model = model_resolver::resolve(
        &ModelSource {
            name: DETECTION_MODEL_NAME,
            url: Some(DETECTION_MODEL_URL),
        },
        &cli.model,
        cli.offline,
        Some(Box::new(download_progress)),
    )?;
    let alignment_model = model_resolver::resolve(
        &ModelSource {
            name: ALIGNMENT_MODEL_NAME,
            url: None,
        },
        &cli.model,
        cli.offline,
        None,
    )?;

    let detector = SeetaFaceDetector::new(&detection_model, &cli.detector_settings())?;
    let landmark_detector = OnnxLandmarkDetector::new(&alignment_model)?;

    let writer: Box<dyn ImageWriter> = if cli.show {
        Box::new(ViewerImageWriter::new())
    } else {
        Box::new(ImageFileWriter::new())
    };

    let mut use_case = AlignImageUseCase::new(
        Box::new(ImageFileReader::new()),
        writer,
        Box::new(detector),
        Box::new(landmark_detector),
        Box::new(CpuAnnotator::new(cli.annotation_style())),
        Box::new(StdoutPipelineLogger::new()),
    )
    .with_all_faces(cli.all_faces);

    let outcome = use_case.execute(&cli.input, &cli.output)?;
    match &outcome {
        AlignOutcome::NoFace { .. } => {
            log::info!("No face found in {}; no image written", cli.input.display());
        }
        AlignOutcome::Annotated { .. } if !cli.show => {
            log::info!("Output written to {}", cli.output.display());
        }
        AlignOutcome::Annotated { .. } => {}
    }

    if let Some(report_path) = &cli.report {
        AlignmentReport::from_outcome(&cli.input, &outcome).write_json(report_path)?;
        log::info!("Report written to {}", report_path.display());
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    cli.detector_settings().validate()?;
    cli.annotation_style().validate()?;
    if !cli.show && !has_extension(&cli.output) {
        return Err(format!(
            "Output file needs an image extension (e.g. .png), got '{}'",
            cli.output.display()
        )
        .into());
    }
    Ok(())
}

fn has_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| !ext.is_empty())
}

/// Help and version requests succeed; every other parse failure is a bad option.
fn parse_error_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_BAD_INPUT,
    }
}

fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    match err.downcast_ref::<AlignError>() {
        Some(AlignError::UnreadableImage { .. }) => EXIT_BAD_INPUT,
        _ => EXIT_FAILURE,
    }
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("facemark").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--all-faces"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("./data/image_0001.png"));
        assert_eq!(cli.output, PathBuf::from("./result_0001.png"));
        assert_eq!(cli.model, PathBuf::from("./model"));
        assert_eq!(cli.detector_settings(), DetectorSettings::default());
        assert_eq!(cli.annotation_style(), AnnotationStyle::default());
        assert!(!cli.show);
    }

    #[test]
    fn test_short_and_long_flags() {
        let short = parse(&["-i", "a.jpg", "-o", "b.png", "-m", "models"]).unwrap();
        let long = parse(&["--input", "a.jpg", "--output", "b.png", "--model", "models"]).unwrap();
        for cli in [short, long] {
            assert_eq!(cli.input, PathBuf::from("a.jpg"));
            assert_eq!(cli.output, PathBuf::from("b.png"));
            assert_eq!(cli.model, PathBuf::from("models"));
        }
    }

    #[test]
    fn test_missing_option_argument_is_bad_input() {
        let err = parse(&["-i"]).unwrap_err();
        assert_eq!(parse_error_exit_code(err.kind()), EXIT_BAD_INPUT);
    }

    #[test]
    fn test_unknown_option_is_bad_input() {
        let err = parse(&["--frobnicate"]).unwrap_err();
        assert_eq!(parse_error_exit_code(err.kind()), EXIT_BAD_INPUT);
    }

    #[test]
    fn test_help_exits_zero() {
        for flag in ["-h", "--help"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(parse_error_exit_code(err.kind()), 0);
        }
    }

    #[test]
    fn test_window_step_applies_to_both_axes() {
        let cli = parse(&["--window-step", "6"]).unwrap();
        assert_eq!(cli.detector_settings().window_step, (6, 6));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(validate(&parse(&["-i", "x.png"]).unwrap()).is_ok());
    }

    #[test]
    fn test_validate_rejects_small_min_face() {
        let cli = parse(&["--min-face-size", "10"]).unwrap();
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_radius() {
        let cli = parse(&["--landmark-radius", "0"]).unwrap();
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_strokes() {
        let thick = parse(&["--box-thickness", "4294967295"]).unwrap();
        assert!(validate(&thick).is_err());
        let wide = parse(&["--landmark-radius", "4294967295"]).unwrap();
        assert!(validate(&wide).is_err());
    }

    #[test]
    fn test_validate_output_extension_only_when_saving() {
        let saving = parse(&["-o", "result"]).unwrap();
        assert!(validate(&saving).is_err());
        let showing = parse(&["-o", "result", "--show"]).unwrap();
        assert!(validate(&showing).is_ok());
    }

    #[test]
    fn test_unreadable_image_exit_code() {
        let err: Box<dyn std::error::Error> = Box::new(AlignError::UnreadableImage {
            path: PathBuf::from("missing.png"),
            source: "no such file".into(),
        });
        assert_eq!(exit_code(err.as_ref()), EXIT_BAD_INPUT);
    }

    #[test]
    fn test_other_failures_exit_one() {
        let err: Box<dyn std::error::Error> = Box::new(AlignError::Detection("boom".into()));
        assert_eq!(exit_code(err.as_ref()), EXIT_FAILURE);
        let plain: Box<dyn std::error::Error> = "model missing".into();
        assert_eq!(exit_code(plain.as_ref()), EXIT_FAILURE);
    }
}
