use argh::FromArgs;
use std::path::PathBuf;

use cornerstone::{
    image::Image,
    imgproc::{
        features::{CornerDetector, CornerDetectorConfig, CornerMetric, StageViewer, ViewerError},
        parallel::ExecutionStrategy,
    },
};

/// Detect structure-tensor corners on an image.
#[derive(FromArgs)]
struct Args {
    /// path to the image to detect corners on
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// corner metric: harris, harmonic_mean or min_eigen
    #[argh(option, short = 'm')]
    metric: Option<CornerMetric>,

    /// fraction of the strongest response used as threshold
    #[argh(option, short = 'q')]
    quality_level: Option<f32>,

    /// sigma of the gradient gaussian
    #[argh(option)]
    gradient_sigma: Option<f32>,

    /// sigma of the structure tensor window
    #[argh(option)]
    window_sigma: Option<f32>,

    /// log the intermediate images to rerun
    #[argh(switch, short = 'v')]
    visualize: bool,

    /// run the row loops on the rayon thread pool
    #[argh(switch, short = 'p')]
    parallel: bool,

    /// path to a json detector configuration, overridden by the other flags
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

/// Logs every stage of the detector as a rerun image.
struct RerunViewer<'a> {
    rec: &'a rerun::RecordingStream,
}

impl StageViewer for RerunViewer<'_> {
    fn show(&mut self, name: &str, stage: &Image<f32, 1>) -> Result<(), ViewerError> {
        let entity = format!("stages/{}", name.to_lowercase().replace(' ', "_"));
        self.rec.log_static(
            entity,
            &rerun::Image::from_elements(
                stage.as_slice(),
                stage.size().into(),
                rerun::ColorModel::L,
            ),
        )?;
        Ok(())
    }
}

fn load_config(args: &Args) -> Result<CornerDetectorConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => CornerDetectorConfig::default(),
    };

    if let Some(metric) = args.metric {
        config = config.with_metric(metric);
    }
    if let Some(quality_level) = args.quality_level {
        config = config.with_quality_level(quality_level);
    }
    if let Some(gradient_sigma) = args.gradient_sigma {
        config = config.with_gradient_sigma(gradient_sigma);
    }
    if let Some(window_sigma) = args.window_sigma {
        config = config.with_window_sigma(window_sigma);
    }
    if args.visualize {
        config = config.with_visualize(true);
    }
    if args.parallel {
        config = config.with_execution(ExecutionStrategy::Parallel);
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();
    let config = load_config(&args)?;
    log::info!("detector configuration: {config:?}");

    // start the recording stream
    let rec = rerun::RecordingStreamBuilder::new("Cornerstone Corner Detector App").spawn()?;

    // read the image as grayscale
    let gray = image::open(&args.image_path)?.to_luma8();
    let size = [gray.width() as usize, gray.height() as usize].into();
    let img_gray8 = Image::<u8, 1>::new(size, gray.into_raw())?;

    // detect the corners
    let detector = CornerDetector::new(config)?;
    let mut viewer = RerunViewer { rec: &rec };
    let keypoints = detector.detect_with_viewer(&img_gray8, &mut viewer)?;
    println!("Found {} corners", keypoints.len());

    // log the image
    rec.log_static(
        "image",
        &rerun::Image::from_elements(
            img_gray8.as_slice(),
            img_gray8.size().into(),
            rerun::ColorModel::L,
        ),
    )?;

    // log the keypoints
    let points = keypoints.iter().map(|k| (k.x, k.y)).collect::<Vec<_>>();
    let radii = keypoints.iter().map(|k| k.size / 2.0).collect::<Vec<_>>();

    rec.log_static(
        "image/keypoints",
        &rerun::Points2D::new(points)
            .with_radii(radii)
            .with_colors([[0, 255, 0]]),
    )?;

    Ok(())
}
