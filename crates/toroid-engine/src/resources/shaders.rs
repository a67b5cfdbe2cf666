use crate::error::ResourceError;

use super::ByteLoader;

/// Parses and validates WGSL source with naga. Errors carry the formatted
/// diagnostic.
pub fn validate_wgsl(name: &str, source: &str) -> Result<(), ResourceError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ResourceError::ShaderCompile {
        name: name.to_string(),
        message: e.emit_to_string(source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ResourceError::ShaderCompile {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    Ok(())
}

/// Loads and validates a shader source without touching the GPU.
pub async fn load_shader_source<L: ByteLoader>(
    loader: &L,
    name: &str,
) -> Result<String, ResourceError> {
    let bytes = loader.load(name).await?;
    let source = String::from_utf8(bytes).map_err(|_| ResourceError::NotUtf8(name.to_string()))?;
    validate_wgsl(name, &source)?;
    log::debug!("shader '{name}' validated");
    Ok(source)
}

/// Loads, validates and compiles a shader module.
///
/// Device-side validation errors are captured in an error scope and
/// returned instead of reaching the uncaptured-error handler.
pub async fn load_shader<L: ByteLoader>(
    device: &wgpu::Device,
    loader: &L,
    name: &str,
) -> Result<wgpu::ShaderModule, ResourceError> {
    let source = load_shader_source(loader, name).await?;

    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(name),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match scope.pop().await {
        None => Ok(module),
        Some(err) => Err(ResourceError::ShaderCompile {
            name: name.to_string(),
            message: err.to_string(),
        }),
    }
}
