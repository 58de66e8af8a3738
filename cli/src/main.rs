fn main() -> anyhow::Result<()> {
    pyra_iconctl::run()
}
