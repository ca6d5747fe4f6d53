fn main() -> anyhow::Result<()> {
    curlcount_lib::run()
}
