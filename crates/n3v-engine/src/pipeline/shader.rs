use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::ShaderStage;

/// Embedded mesh shader (vertex + fragment stages).
pub const MESH_SHADER_SOURCE: &str = include_str!("shaders/mesh.wgsl");

pub(crate) const VS_ENTRY: &str = "vs_main";
pub(crate) const FS_ENTRY: &str = "fs_main";

/// Shader compilation failure, carrying the compiler's diagnostic text.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to parse shader `{label}`:\n{diagnostic}")]
    Parse { label: &'static str, diagnostic: String },

    #[error("shader `{label}` failed validation:\n{diagnostic}")]
    Validation { label: &'static str, diagnostic: String },

    #[error("shader `{label}` has no {stage:?} entry point named `{entry_point}`")]
    MissingEntryPoint {
        label: &'static str,
        stage: ShaderStage,
        entry_point: &'static str,
    },
}

/// Parses and validates WGSL, and checks that the required entry points exist.
///
/// wgpu reports invalid shader modules through its uncaptured-error handler;
/// running naga up front turns that into a regular error with readable output.
pub fn validate_wgsl(
    label: &'static str,
    source: &str,
    entry_points: &[(ShaderStage, &'static str)],
) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        label,
        diagnostic: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderError::Validation {
            label,
            diagnostic: e.emit_to_string(source),
        })?;

    for &(stage, entry_point) in entry_points {
        let found = module
            .entry_points
            .iter()
            .any(|ep| ep.stage == stage && ep.name == entry_point);
        if !found {
            return Err(ShaderError::MissingEntryPoint { label, stage, entry_point });
        }
    }

    Ok(module)
}

/// Validates the embedded mesh shader and creates the GPU module.
pub(crate) fn compile_mesh_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule, ShaderError> {
    const LABEL: &str = "n3v mesh shader";

    validate_wgsl(
        LABEL,
        MESH_SHADER_SOURCE,
        &[(ShaderStage::Vertex, VS_ENTRY), (ShaderStage::Fragment, FS_ENTRY)],
    )?;

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(LABEL),
        source: wgpu::ShaderSource::Wgsl(MESH_SHADER_SOURCE.into()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGES: [(ShaderStage, &str); 2] =
        [(ShaderStage::Vertex, VS_ENTRY), (ShaderStage::Fragment, FS_ENTRY)];

    #[test]
    fn embedded_shader_is_valid() {
        let module = validate_wgsl("mesh", MESH_SHADER_SOURCE, &STAGES).unwrap();
        assert_eq!(module.entry_points.len(), 2);
    }

    #[test]
    fn embedded_shader_reads_both_vertex_attributes() {
        let module = validate_wgsl("mesh", MESH_SHADER_SOURCE, &STAGES).unwrap();
        let vs = module
            .entry_points
            .iter()
            .find(|ep| ep.name == VS_ENTRY)
            .unwrap();

        // One struct argument carrying locations 0 and 1.
        assert_eq!(vs.function.arguments.len(), 1);
        let ty = &module.types[vs.function.arguments[0].ty];
        let naga::TypeInner::Struct { members, .. } = &ty.inner else {
            panic!("vertex input is not a struct");
        };
        let locations: Vec<_> = members
            .iter()
            .filter_map(|m| match m.binding {
                Some(naga::Binding::Location { location, .. }) => Some(location),
                _ => None,
            })
            .collect();
        assert_eq!(locations, vec![0, 1]);
    }

    #[test]
    fn syntax_error_carries_diagnostic() {
        let err = validate_wgsl("broken", "fn vs_main( {", &STAGES).unwrap_err();
        match &err {
            ShaderError::Parse { label, diagnostic } => {
                assert_eq!(*label, "broken");
                assert!(!diagnostic.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn missing_fragment_stage_is_reported() {
        let src = "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(0.0); }";
        let err = validate_wgsl("vs-only", src, &STAGES).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::MissingEntryPoint { stage: ShaderStage::Fragment, entry_point: "fs_main", .. }
        ));
    }
}
