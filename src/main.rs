use anyhow::Context;

fn main() -> anyhow::Result<()> {
    pinmark::run().context("pinmark demo session failed")
}
