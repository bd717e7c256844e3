use approx::assert_abs_diff_eq;
use arcsurf_camtools::{
    assemble, height, lateral_range, sweep_samples, ArcSurfaceParameters, LayerOutcome, LayerPlanner,
    ProgramAssembler, SkipReason, SurfaceOrientation, SweepPattern,
};
use arcsurf_core::{LateralRange, Position};

fn concave_params() -> ArcSurfaceParameters {
    ArcSurfaceParameters {
        apex_x: 0.0,
        center_z: -10.0,
        initial_radius: 10.0,
        depth_per_layer: 0.1,
        layer_count: 1,
        sweep_step: 0.2,
        max_half_range: 12.5,
        tool_radius: 0.0,
        surface_orientation: SurfaceOrientation::ConcaveDown,
        z_offset: 0.0,
        ..Default::default()
    }
}

fn convex_params(pattern: SweepPattern) -> ArcSurfaceParameters {
    ArcSurfaceParameters {
        pattern,
        layer_count: 4,
        ..Default::default()
    }
}

#[test]
fn test_first_layer_range_matches_formula() {
    let params = concave_params();
    let layer = params.schedule().layer(1, params.initial_radius);
    assert_abs_diff_eq!(layer.radius, 9.9, epsilon = 1e-12);

    let range = lateral_range(
        layer.radius,
        layer.depth,
        params.center_z,
        params.apex_x,
        params.max_half_range,
    );
    let disc = 9.9_f64.powi(2) - (-0.1_f64 - (-10.0)).powi(2);
    let expected = if disc < 0.0 { 0.0 } else { disc.sqrt().min(12.5) };
    assert_abs_diff_eq!(range.low, params.apex_x - expected, epsilon = 1e-6);
    assert_abs_diff_eq!(range.high, params.apex_x + expected, epsilon = 1e-6);
}

#[test]
fn test_unreachable_depth_gives_apex_point() {
    let range = lateral_range(5.0, -100.0, 0.0, 1.25, 12.5);
    assert_eq!(range, LateralRange::point(1.25));
}

#[test]
fn test_endpoints_always_included() {
    let cases = [
        (-14.5, 14.5, 0.2),
        (0.0, 1.0, 0.3),
        (-3.3, 0.0, 0.7),
        (2.0, -2.0, 0.15),
        (0.0, 0.1, 1.0),
    ];
    for (low, high, step) in cases {
        let samples = sweep_samples(low, high, step);
        assert_eq!(samples[0], low);
        assert_eq!(*samples.last().unwrap(), high);
        let spacing = (high - low).abs() / (samples.len() - 1) as f64;
        assert!(spacing <= step + 1e-9, "spacing {spacing} exceeds step {step}");
    }
}

#[test]
fn test_collapsed_layers_contribute_no_motion() {
    let params = ArcSurfaceParameters {
        initial_radius: 0.35,
        center_z: -0.2,
        z_offset: 0.0,
        tool_radius: 0.0,
        layer_count: 6,
        ..Default::default()
    };
    let assembler = ProgramAssembler::new(params.clone()).unwrap();
    for outcome in assembler.plan_layers() {
        if let LayerOutcome::Skipped(skipped) = outcome {
            if skipped.layer.radius <= 0.0 {
                assert_eq!(skipped.reason, SkipReason::NonPositiveRadius);
            }
        }
    }

    let program = assembler.assemble();
    let skipped: Vec<u32> = program.skipped().map(|s| s.layer.index).collect();
    assert!(skipped.contains(&4));
    assert!(skipped.contains(&5));
    assert!(skipped.contains(&6));

    // every layer is accounted for exactly once, in order
    let mut seen: Vec<u32> = program
        .planned_layers()
        .map(|l| l.index)
        .chain(skipped.iter().copied())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_assemble_is_idempotent() {
    for pattern in [
        SweepPattern::SweepBothHalves,
        SweepPattern::ZigzagAlternate,
        SweepPattern::EdgesToCenter,
    ] {
        let params = convex_params(pattern);
        let first = assemble(&params).unwrap();
        let second = assemble(&params).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_zigzag_alternates_sides_between_layers() {
    let params = convex_params(SweepPattern::ZigzagAlternate);
    let outcomes = ProgramAssembler::new(params.clone()).unwrap().plan_layers();
    let first = outcomes[0].plan().expect("layer 1 is cut");
    let second = outcomes[1].plan().expect("layer 2 is cut");

    let last_of_first = first.cutting_samples().last().unwrap().x;
    let first_of_second = second.cutting_samples().next().unwrap().x;
    assert!(
        (last_of_first - params.apex_x) * (first_of_second - params.apex_x) < 0.0,
        "layer 1 ends at {last_of_first}, layer 2 starts at {first_of_second}"
    );
}

#[test]
fn test_cut_heights_stay_on_surface() {
    let params = convex_params(SweepPattern::SweepBothHalves);
    let planner = LayerPlanner::new(&params);
    for layer in params.schedule().layers(params.initial_radius) {
        let range = lateral_range(
            layer.radius,
            layer.depth,
            params.center_z,
            params.apex_x,
            params.effective_half_range(),
        );
        let entry = Position::new(params.apex_x, params.y_start, params.safe_height);
        let outcome = planner.plan_layer(layer, range, entry);
        let plan = outcome.plan().expect("convex layers are cut");
        for sample in plan.cutting_samples() {
            assert!(range.contains(sample.x));
            let z = sample.z.unwrap() - params.z_offset;
            let dz = z - params.center_z;
            let on_circle = (sample.x - params.apex_x).powi(2) + dz * dz;
            // the convex clip never binds above the floor for this geometry
            assert_abs_diff_eq!(on_circle, layer.radius * layer.radius, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_layers_progress_inwards() {
    let params = convex_params(SweepPattern::ZigzagAlternate);
    let program = assemble(&params).unwrap();
    let layers: Vec<_> = program.planned_layers().copied().collect();
    assert_eq!(layers.len(), 4);
    for pair in layers.windows(2) {
        assert!(pair[1].depth < pair[0].depth);
        assert!(pair[1].radius < pair[0].radius);
    }
}

#[test]
fn test_concave_programs_stay_below_layer_floor() {
    // bowl whose arc center sits above the stock top
    let base = ArcSurfaceParameters {
        apex_x: 1.5,
        center_z: 5.0,
        initial_radius: 8.0,
        layer_count: 3,
        sweep_step: 0.25,
        max_half_range: 12.0,
        tool_radius: 0.0,
        z_offset: 0.0,
        plunge_clearance: 0.5,
        surface_orientation: SurfaceOrientation::ConcaveDown,
        ..Default::default()
    };

    for pattern in [
        SweepPattern::SweepBothHalves,
        SweepPattern::ZigzagAlternate,
        SweepPattern::EdgesToCenter,
    ] {
        let params = ArcSurfaceParameters { pattern, ..base.clone() };
        let outcomes = ProgramAssembler::new(params.clone()).unwrap().plan_layers();
        assert_eq!(outcomes.len(), 3);

        for outcome in &outcomes {
            let plan = outcome.plan().expect("concave layers are cut");
            let layer = plan.layer;
            assert!(plan.cutting_samples().count() > 2);
            for sample in plan.cutting_samples() {
                let z = sample.z.unwrap();
                let expected = height(
                    sample.x,
                    layer.radius,
                    params.center_z,
                    params.apex_x,
                    layer.depth,
                    SurfaceOrientation::ConcaveDown,
                );
                assert!(plan.range.contains(sample.x));
                assert_abs_diff_eq!(z, expected, epsilon = 1e-12);
                assert!(
                    z <= layer.depth + 1e-9,
                    "{pattern}: layer {} cut at Z={z} above floor {}",
                    layer.index,
                    layer.depth
                );
            }
        }

        // apex is the deepest point of the bowl
        let first = outcomes[0].plan().unwrap();
        let apex_cut = first
            .cutting_samples()
            .find(|s| s.x == params.apex_x)
            .expect("apex is sampled");
        assert_abs_diff_eq!(apex_cut.z.unwrap(), 5.0 - 7.9, epsilon = 1e-9);
    }
}
