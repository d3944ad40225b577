fn main() -> anyhow::Result<()> {
    mockperf_cli::run()
}
