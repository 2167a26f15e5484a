// Copyright 2026 the Trazo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembling filters into a rendering pipeline.

use alloc::boxed::Box;

use crate::{
    Affine, Cap, ClosedPathDetector, Dasher, NormMode, Normalizer, PathClipFilter, PathConsumer,
    PathEl, PathSimplifier, Point, Rect, Stroke, StrokeError, Stroker, Transformed,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The chain of filters between a path and a rasterizer.
///
/// Without a stroke the path is prepared for filling: transformed,
/// optionally snapped to the pixel grid, clipped and simplified. With a
/// stroke it is also dashed and stroked, and the output is the outline to
/// fill.
///
/// A transform that scales uniformly is folded into the stroke style, so
/// the stroker works in device space. Any other transform is undone before
/// the stroker and reapplied after it, so that the stroke is drawn in user
/// space and then distorted with the path.
///
/// ```
/// use trazo::{Affine, BezPath, Cap, Pipeline, Rect, Stroke};
///
/// let mut path = BezPath::new();
/// path.move_to((0.0, 0.0));
/// path.line_to((10.0, 0.0));
///
/// let mut outline = BezPath::new();
/// Pipeline::new()
///     .with_transform(Affine::scale(2.0))
///     .with_clip(Rect::new(0.0, -10.0, 100.0, 10.0))
///     .with_stroke(Stroke::new(1.0).with_caps(Cap::Butt))
///     .run(&path, &mut outline);
/// assert_eq!(outline.subpath_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    transform: Option<Affine>,
    clip: Option<Rect>,
    stroke: Option<Stroke>,
    norm: Option<NormMode>,
    simplify: bool,
    no_subdivision: bool,
}

impl Pipeline {
    /// A pipeline that passes paths through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the path from user space to device space.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Skip work on geometry beyond `clip`, in device space.
    #[must_use]
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Stroke the path with `style`, in user space units.
    #[must_use]
    pub fn with_stroke(mut self, style: Stroke) -> Self {
        self.stroke = Some(style);
        self
    }

    /// Snap the transformed path to the pixel grid.
    #[must_use]
    pub fn with_norm(mut self, mode: NormMode) -> Self {
        self.norm = Some(mode);
        self
    }

    /// Drop output segments shorter than a tenth of a pixel.
    #[must_use]
    pub fn with_simplifier(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Whether curves are split into simple pieces and long segments at
    /// the clip rectangle. On by default.
    #[must_use]
    pub fn with_subdivision(mut self, subdivide: bool) -> Self {
        self.no_subdivision = !subdivide;
        self
    }

    /// Check the stroke style and clip rectangle.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an invalid stroke style (see
    /// [`Stroke::validate`]) or a clip rectangle with a non-finite
    /// coordinate.
    pub fn validate(&self) -> Result<(), StrokeError> {
        if let Some(style) = &self.stroke {
            style.validate()?;
        }
        if let Some(clip) = self.clip {
            if !clip.is_finite() {
                return Err(StrokeError::InvalidClip);
            }
        }
        Ok(())
    }

    /// Send `path` through the pipeline into `out`, finishing with
    /// [`path_done`](PathConsumer::path_done).
    pub fn run<C: PathConsumer>(&self, path: impl IntoIterator<Item = PathEl>, mut out: C) {
        if self.transform.is_some_and(Affine::is_singular) {
            log::debug!("singular transform, nothing to draw");
            out.move_to(Point::ZERO);
            out.path_done();
            return;
        }
        let mut chain = self.build(out);
        chain.consume(path);
    }

    fn build<'a, C: PathConsumer + 'a>(&self, out: C) -> Box<dyn PathConsumer + 'a> {
        let subdivide = !self.no_subdivision;
        let mut chain: Box<dyn PathConsumer + 'a> = Box::new(out);
        if self.simplify {
            chain = Box::new(PathSimplifier::new(chain));
        }
        match &self.stroke {
            None => {
                if let Some(clip) = self.clip {
                    log::debug!("filling, clipped to {clip:?}");
                    chain = Box::new(PathClipFilter::new(chain, clip).with_subdivision(subdivide));
                }
            }
            Some(style) => {
                let (style, delta) = match self.transform {
                    Some(transform) => match transform.uniform_scale() {
                        Some(scale) => {
                            log::debug!("stroking in device space, scale {scale}");
                            (style.scaled(scale), None)
                        }
                        None => {
                            log::debug!("stroking in user space, delta {:?}", transform.linear());
                            (style.clone(), Some(transform.linear()))
                        }
                    },
                    None => (style.clone(), None),
                };
                // The clip rectangle in the space the stroker runs in.
                let (clip, inv_scale) = match (self.clip, delta) {
                    (Some(clip), Some(delta)) => (
                        Some(delta.inverse().transform_rect_bbox(clip)),
                        1.0 / delta.determinant().abs().sqrt(),
                    ),
                    (clip, _) => (clip, 1.0),
                };

                if let Some(delta) = delta {
                    chain = Box::new(Transformed::new(chain, delta));
                }
                let mut stroker = Stroker::new(chain, &style).with_subdivision(subdivide);
                if let Some(clip) = clip {
                    stroker = stroker.with_clip(clip, inv_scale);
                }
                chain = Box::new(stroker);
                if style.is_dashed() {
                    let mut dasher = Dasher::new(chain, &style.dash_pattern, style.dash_offset)
                        .with_line_width(style.width)
                        .with_subdivision(subdivide);
                    if let Some(clip) = clip {
                        let margin = style.clip_margin();
                        dasher = dasher.with_clip(clip.inflate(margin, margin), inv_scale);
                    }
                    chain = Box::new(dasher);
                } else if clip.is_some()
                    && (style.start_cap != Cap::Butt || style.end_cap != Cap::Butt)
                {
                    log::debug!("detecting closed subpaths for clipped caps");
                    chain = Box::new(ClosedPathDetector::new(chain));
                }
                if let Some(delta) = delta {
                    chain = Box::new(Transformed::new(chain, delta.inverse()));
                }
            }
        }
        if let Some(mode) = self.norm {
            chain = Box::new(Normalizer::new(chain, mode));
        }
        chain = Box::new(SkipNonFinite::new(chain));
        if let Some(transform) = self.transform {
            chain = Box::new(Transformed::new(chain, transform));
        }
        chain
    }
}

/// Drops elements with a NaN or infinite point.
///
/// A dropped move leaves the subpath to start at the end of the next
/// finite segment.
struct SkipNonFinite<C> {
    out: C,
    // A move was dropped and no finite point has followed.
    pending: bool,
}

impl<C> SkipNonFinite<C> {
    fn new(out: C) -> Self {
        Self {
            out,
            pending: false,
        }
    }

    /// Whether the segment ending at `end` should be drawn.
    fn segment_to(&mut self, points: &[Point], end: Point) -> bool
    where
        C: PathConsumer,
    {
        if !points.iter().all(|p| p.is_finite()) {
            log::debug!("dropping segment with non-finite point {points:?}");
            return false;
        }
        if self.pending {
            self.pending = false;
            self.out.move_to(end);
            return false;
        }
        true
    }
}

impl<C: PathConsumer> PathConsumer for SkipNonFinite<C> {
    fn move_to(&mut self, p: Point) {
        if p.is_finite() {
            self.pending = false;
            self.out.move_to(p);
        } else {
            log::debug!("dropping non-finite move to {p:?}");
            self.pending = true;
        }
    }

    fn line_to(&mut self, p: Point) {
        if self.segment_to(&[p], p) {
            self.out.line_to(p);
        }
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        if self.segment_to(&[p1, p2], p2) {
            self.out.quad_to(p1, p2);
        }
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        if self.segment_to(&[p1, p2, p3], p3) {
            self.out.curve_to(p1, p2, p3);
        }
    }

    fn close_path(&mut self) {
        if !self.pending {
            self.out.close_path();
        }
    }

    fn path_done(&mut self) {
        self.pending = false;
        self.out.path_done();
    }

    fn closed_hint(&mut self, closed: bool) {
        self.out.closed_hint(closed);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Affine, BezPath, Cap, Join, NormMode, PathEl, Pipeline, Point, Rect, Stroke, StrokeError,
    };

    fn line() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path
    }

    fn run(pipeline: &Pipeline, path: &BezPath) -> BezPath {
        let mut out = BezPath::new();
        pipeline.run(path, &mut out);
        out
    }

    fn vertices(path: &BezPath) -> impl Iterator<Item = Point> + '_ {
        path.iter().filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(p),
            PathEl::ClosePath => None,
        })
    }

    #[test]
    fn empty_pipeline_passes_through() {
        let mut path = line();
        path.quad_to((10.0, 10.0), (0.0, 10.0));
        path.close_path();
        assert_eq!(run(&Pipeline::new(), &path), path);
    }

    #[test]
    fn singular_transform_draws_nothing() {
        let pipeline = Pipeline::new()
            .with_transform(Affine::scale_non_uniform(1.0, 0.0))
            .with_stroke(Stroke::new(1.0));
        assert_eq!(
            run(&pipeline, &line()).elements(),
            &[PathEl::MoveTo(Point::ZERO)]
        );
    }

    #[test]
    fn uniform_scale_scales_the_style() {
        let style = Stroke::new(2.0).with_caps(Cap::Butt).with_dashes(0.0, [3.0, 2.0]);
        let scaled = run(
            &Pipeline::new()
                .with_transform(Affine::scale(2.0))
                .with_stroke(style.clone()),
            &line(),
        );
        let mut big_line = BezPath::new();
        big_line.move_to((0.0, 0.0));
        big_line.line_to((20.0, 0.0));
        let direct = run(&Pipeline::new().with_stroke(style.scaled(2.0)), &big_line);
        assert_eq!(scaled, direct);
        assert_eq!(scaled.subpath_count(), 2);
    }

    #[test]
    fn non_uniform_scale_distorts_the_stroke() {
        let pipeline = Pipeline::new()
            .with_transform(Affine::scale_non_uniform(1.0, 3.0))
            .with_stroke(Stroke::new(2.0).with_caps(Cap::Butt));
        let out = run(&pipeline, &line());
        let verts: std::vec::Vec<Point> = vertices(&out).collect();
        for corner in [(0.0, 3.0), (10.0, 3.0), (10.0, -3.0), (0.0, -3.0)] {
            let corner = Point::from(corner);
            assert!(
                verts.iter().any(|v| v.distance(corner) < 1e-9),
                "missing {corner:?} in {verts:?}"
            );
        }
        for v in verts {
            assert!((v.y.abs() - 3.0).abs() < 1e-9, "{v:?}");
        }
    }

    #[test]
    fn clipped_stroke_stays_near_the_clip() {
        let mut path = BezPath::new();
        path.move_to((-1000.0, 50.0));
        path.line_to((1000.0, 50.0));
        path.line_to((1000.0, 60.0));
        path.line_to((-1000.0, 60.0));
        path.close_path();
        for cap in [Cap::Butt, Cap::Round, Cap::Square] {
            let style = Stroke::new(2.0).with_caps(cap).with_join(Join::Round);
            let pipeline = Pipeline::new()
                .with_clip(Rect::new(0.0, 0.0, 100.0, 100.0))
                .with_stroke(style.clone());
            let out = run(&pipeline, &path);
            assert!(!out.is_empty());
            let reach = style.clip_margin() + 1.0 + 1e-9;
            for v in vertices(&out) {
                assert!(v.x >= -reach && v.x <= 100.0 + reach, "{v:?} with {cap:?}");
            }
        }
    }

    #[test]
    fn filling_clips_and_snaps() {
        let mut path = BezPath::new();
        path.move_to((-50.0, -50.0));
        path.line_to((-20.0, -50.0));
        path.line_to((-20.0, -20.0));
        path.move_to((1.0, 1.0));
        path.line_to((1.02, 1.0));
        path.line_to((5.0, 1.0));
        let pipeline = Pipeline::new()
            .with_clip(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_norm(NormMode::PixelCenter)
            .with_simplifier(true);
        let out = run(&pipeline, &path);
        assert_eq!(
            out.elements(),
            &[
                PathEl::MoveTo(Point::new(-49.5, -49.5)),
                PathEl::MoveTo(Point::new(1.5, 1.5)),
                PathEl::LineTo(Point::new(5.5, 1.5)),
            ]
        );
    }

    #[test]
    fn non_finite_points_are_dropped() {
        let mut path = BezPath::new();
        path.move_to((f64::NAN, 0.0));
        path.line_to((1.0, 1.0));
        path.line_to((f64::INFINITY, 1.0));
        path.quad_to((2.0, f64::NAN), (2.0, 2.0));
        path.line_to((3.0, 2.0));
        path.close_path();
        assert_eq!(
            run(&Pipeline::new(), &path).elements(),
            &[
                PathEl::MoveTo(Point::new(1.0, 1.0)),
                PathEl::LineTo(Point::new(3.0, 2.0)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn dashed_stroke_through_a_nan() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((f64::NAN, 0.0));
        path.line_to((10.0, 0.0));
        let style = Stroke::new(2.0)
            .with_caps(Cap::Butt)
            .with_dashes(0.0, [3.0, 2.0]);
        for pipeline in [
            Pipeline::new().with_stroke(style.clone()),
            Pipeline::new()
                .with_clip(Rect::new(0.0, -5.0, 5.0, 5.0))
                .with_stroke(style.clone()),
        ] {
            let out = run(&pipeline, &path);
            assert_eq!(out.subpath_count(), 2, "{out:?}");
            assert!(vertices(&out).all(Point::is_finite), "{out:?}");
        }
    }

    #[test]
    fn validation() {
        assert_eq!(Pipeline::new().validate(), Ok(()));
        assert_eq!(
            Pipeline::new()
                .with_clip(Rect::new(0.0, 0.0, f64::NAN, 1.0))
                .validate(),
            Err(StrokeError::InvalidClip)
        );
        assert_eq!(
            Pipeline::new()
                .with_stroke(Stroke::new(-1.0))
                .validate(),
            Err(StrokeError::NonPositiveWidth)
        );
    }
}
