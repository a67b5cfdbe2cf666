use crate::config::RendererConfig;
use crate::paint::Color;
use crate::transform::{TransformBlock, TransformState};

/// Index count of the screen quad.
pub const QUAD_INDEX_COUNT: u32 = 6;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PassKind {
    /// Torus into the offscreen target.
    Scene,
    /// Screen quad sampling the offscreen target into the presented surface.
    Composite,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PassTarget {
    Offscreen,
    Surface,
}

/// One draw pass: what to upload, where to draw, how much.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassPlan {
    pub kind: PassKind,
    pub target: PassTarget,
    pub clear: Color,
    /// Written to the shared uniform buffer right before the pass.
    pub block: TransformBlock,
    pub index_count: u32,
}

/// Ordered passes for one frame. Empty while resources are not ready.
pub fn plan_frame(
    ready: bool,
    config: &RendererConfig,
    transforms: &TransformState,
    torus_index_count: u32,
) -> Vec<PassPlan> {
    if !ready {
        return Vec::new();
    }

    vec![
        PassPlan {
            kind: PassKind::Scene,
            target: PassTarget::Offscreen,
            clear: config.scene_clear,
            block: *transforms.scene_block(),
            index_count: torus_index_count,
        },
        PassPlan {
            kind: PassKind::Composite,
            target: PassTarget::Surface,
            clear: config.composite_clear,
            block: *transforms.composite_block(),
            index_count: QUAD_INDEX_COUNT,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::OutputSize;
    use crate::time::FrameTime;

    fn transforms() -> TransformState {
        let mut t = TransformState::new(&RendererConfig::default(), OutputSize::new(800.0, 600.0));
        t.update(&FrameTime::at(1.0, 10));
        t
    }

    #[test]
    fn not_ready_plans_nothing() {
        assert!(plan_frame(false, &RendererConfig::default(), &transforms(), 16200).is_empty());
    }

    #[test]
    fn scene_pass_precedes_composite() {
        let config = RendererConfig::default();
        let t = transforms();
        let passes = plan_frame(true, &config, &t, config.torus.index_count() as u32);

        let kinds: Vec<PassKind> = passes.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PassKind::Scene, PassKind::Composite]);

        assert_eq!(passes[0].target, PassTarget::Offscreen);
        assert_eq!(passes[0].clear, Color::BLACK);
        assert_eq!(passes[0].index_count, 16200);
        assert_eq!(passes[0].block, *t.scene_block());

        assert_eq!(passes[1].target, PassTarget::Surface);
        assert_eq!(passes[1].clear, Color::CORNSILK);
        assert_eq!(passes[1].index_count, 6);
        assert_eq!(passes[1].block, *t.composite_block());
    }

    #[test]
    fn passes_carry_distinct_blocks() {
        let config = RendererConfig::default();
        let passes = plan_frame(true, &config, &transforms(), 16200);
        assert_ne!(passes[0].block, passes[1].block);
    }

    #[test]
    fn clear_colors_follow_config() {
        let config = RendererConfig {
            scene_clear: Color::rgba(0.1, 0.2, 0.3, 1.0),
            ..RendererConfig::default()
        };
        let passes = plan_frame(true, &config, &transforms(), 6);
        assert_eq!(passes[0].clear, Color::rgba(0.1, 0.2, 0.3, 1.0));
    }
}
