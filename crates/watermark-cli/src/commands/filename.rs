use anyhow::Result;
use clap::Args;
use watermark_core::filename::download_filename;

#[derive(Args)]
pub struct FilenameArgs {
    /// Watermark text
    pub text: String,
}

pub fn run(args: &FilenameArgs) -> Result<()> {
    println!("{}", download_filename(&args.text));
    Ok(())
}
