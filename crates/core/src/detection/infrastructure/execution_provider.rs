use ort::execution_providers::ExecutionProviderDispatch;

/// Execution providers tried, in order, before ONNX Runtime's built-in CPU one.
///
/// Registration failures are not fatal: the session falls back to CPU.
pub fn preferred_execution_providers() -> Vec<ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![ort::execution_providers::CPUExecutionProvider::default().build()]
    }
}
