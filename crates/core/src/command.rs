//! Assembly of the main SAGA invocation and its follow-up commands.

use crate::{
    error::Result,
    export::ExportContext,
    translate,
    types::{AlgorithmDescriptor, OutputKind},
};

/// Builds the main command line:
/// `<library> "<tool name>" <hardcoded...> <parameters...> <outputs...>`.
///
/// Output destinations are resolved (and remembered on the descriptor)
/// as part of assembly, so follow-up commands and sidecar writing see
/// the same paths.
pub fn build_main_command(
    alg: &mut AlgorithmDescriptor,
    ctx: &mut ExportContext<'_>,
) -> Result<String> {
    let cell_size = alg.output_cell_size();

    let mut command = format!("{} \"{}\"", alg.group, alg.saga_name);
    for token in &alg.hardcoded_tokens {
        command.push(' ');
        command.push_str(token);
    }

    for param in &alg.parameters {
        if let Some(fragment) = translate::render_parameter(
            param,
            alg.extent_field_names.as_ref(),
            cell_size,
            &ctx.exported,
            ctx.temp,
        )? {
            command.push(' ');
            command.push_str(&fragment);
        }
    }

    for output in &mut alg.outputs {
        let path = output.resolve_destination(ctx.temp)?;
        command.push_str(&format!(" -{} \"{}\"", output.name, path));
    }

    Ok(command)
}

/// A tool whose main invocation leaves an intermediate grid behind and
/// needs one more engine command to finish the job.
struct FollowUpRule {
    saga_name: &'static str,
    build: fn(&str) -> String,
}

// Keyed by the SAGA tool name; add a row rather than branching inline
// when another tool turns out to need post-processing.
const FOLLOW_UP_RULES: &[FollowUpRule] = &[FollowUpRule {
    saga_name: "RGB Composite",
    build: rgb_composite_conversion,
}];

// RGB Composite writes its result as a native grid next to the requested
// image file; convert it with io_grid_image afterwards.
fn rgb_composite_conversion(output_path: &str) -> String {
    format!(
        "io_grid_image 0 -IS_RGB -GRID:\"{output_path}.{}\" -FILE:\"{output_path}\"",
        translate::NATIVE_GRID_EXTENSION
    )
}

/// Follow-up commands for the given descriptor, referencing the first
/// raster output's resolved destination. Empty for almost every tool.
pub fn follow_up_commands(alg: &AlgorithmDescriptor) -> Vec<String> {
    let Some(rule) = FOLLOW_UP_RULES
        .iter()
        .find(|rule| rule.saga_name == alg.saga_name)
    else {
        return Vec::new();
    };
    let Some(destination) = alg
        .outputs
        .iter()
        .find(|out| out.kind == OutputKind::Raster)
        .and_then(|out| out.destination.as_deref())
    else {
        return Vec::new();
    };
    vec![(rule.build)(destination)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Output;

    fn descriptor(saga_name: &str) -> AlgorithmDescriptor {
        AlgorithmDescriptor {
            name: "test".into(),
            display_name: "Test".into(),
            command_line_name: "saga:test".into(),
            saga_name: saga_name.into(),
            group: "grid_visualisation".into(),
            display_group: "Raster visualization".into(),
            parameters: vec![],
            outputs: vec![],
            hardcoded_tokens: vec![],
            extent_field_names: None,
            allow_unmatching_grid_extents: false,
            description_file: "test.txt".into(),
        }
    }

    #[test]
    fn test_follow_up_for_rgb_composite() {
        let mut alg = descriptor("RGB Composite");
        let mut out = Output::new("RGB", "Composite", OutputKind::Raster);
        out.destination = Some("/tmp/rgb.tif".into());
        alg.outputs.push(out);

        assert_eq!(
            follow_up_commands(&alg),
            vec![
                "io_grid_image 0 -IS_RGB -GRID:\"/tmp/rgb.tif.sgrd\" -FILE:\"/tmp/rgb.tif\""
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_no_follow_up_for_ordinary_tools() {
        let mut alg = descriptor("Slope, Aspect, Curvature");
        let mut out = Output::new("SLOPE", "Slope", OutputKind::Raster);
        out.destination = Some("/tmp/slope.tif".into());
        alg.outputs.push(out);

        assert!(follow_up_commands(&alg).is_empty());
    }

    #[test]
    fn test_no_follow_up_without_raster_output() {
        let alg = descriptor("RGB Composite");
        assert!(follow_up_commands(&alg).is_empty());
    }
}
