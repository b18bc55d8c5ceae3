use miette::Result;

/// Main entry point for the uv-dep-graph CLI tool
fn main() -> Result<()> {
    // Install miette's panic and error handler for beautiful error reporting
    miette::set_panic_hook();
    uv_dep_graph::init_tracing();

    // Run the library's main function
    uv_dep_graph::run()
}
