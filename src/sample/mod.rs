//! Random sample annotation sets.

use rand::{rngs::StdRng, Rng, RngExt, SeedableRng};

use crate::error::LabelpadError;
use crate::ir::{Annotation, AnnotationSet, BBoxXYWH, ClassId, ClassList};

/// Sampling options.
#[derive(Clone, Debug)]
pub struct SampleOptions {
    pub min_boxes: usize,
    pub max_boxes: usize,
    /// Smallest box side as a fraction of the frame.
    pub min_fraction: f64,
    /// Largest box side as a fraction of the frame.
    pub max_fraction: f64,
    pub seed: Option<u64>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            min_boxes: 2,
            max_boxes: 4,
            min_fraction: 0.1,
            max_fraction: 0.4,
            seed: None,
        }
    }
}

/// Validate sampling options before running.
pub fn validate_sample_options(opts: &SampleOptions) -> Result<(), LabelpadError> {
    if opts.min_boxes > opts.max_boxes {
        return Err(LabelpadError::InvalidArgument(format!(
            "min_boxes ({}) exceeds max_boxes ({})",
            opts.min_boxes, opts.max_boxes
        )));
    }

    let fractions_ok = opts.min_fraction > 0.0
        && opts.min_fraction <= opts.max_fraction
        && opts.max_fraction <= 1.0;
    if !fractions_ok {
        return Err(LabelpadError::InvalidArgument(
            "box fractions must satisfy 0 < min <= max <= 1".to_string(),
        ));
    }

    Ok(())
}

/// Generates a random annotation set whose boxes all lie inside the frame.
pub fn sample_set(classes: &ClassList, opts: &SampleOptions) -> Result<AnnotationSet, LabelpadError> {
    validate_sample_options(opts)?;
    if classes.is_empty() {
        return Err(LabelpadError::InvalidArgument(
            "cannot sample from an empty class list".to_string(),
        ));
    }

    let set = if let Some(seed) = opts.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(classes.len(), opts, &mut rng)
    } else {
        let mut rng = rand::rng();
        generate(classes.len(), opts, &mut rng)
    };

    log::debug!("sampled {} annotation(s)", set.len());
    Ok(set)
}

fn generate<R: Rng + ?Sized>(class_count: usize, opts: &SampleOptions, rng: &mut R) -> AnnotationSet {
    let count = rng.random_range(opts.min_boxes..=opts.max_boxes);

    (0..count)
        .map(|_| {
            let w = random_fraction(opts, rng);
            let h = random_fraction(opts, rng);
            let x = rng.random::<f64>() * (1.0 - w);
            let y = rng.random::<f64>() * (1.0 - h);
            let class_id = ClassId::new(rng.random_range(0..class_count));
            Annotation::new(class_id, BBoxXYWH::from_xywh(x, y, w, h))
        })
        .collect()
}

fn random_fraction<R: Rng + ?Sized>(opts: &SampleOptions, rng: &mut R) -> f64 {
    if opts.min_fraction == opts.max_fraction {
        opts.min_fraction
    } else {
        rng.random_range(opts.min_fraction..opts.max_fraction)
    }
}
