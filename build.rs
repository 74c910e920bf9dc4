fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cargo = vergen_gitcl::CargoBuilder::default().target_triple(true).build()?;
	let gitcl = vergen_gitcl::GitclBuilder::default().sha(true).build()?;

	// Emits idempotent placeholders when the build happens outside a git checkout.
	vergen_gitcl::Emitter::default()
		.add_instructions(&cargo)?
		.add_instructions(&gitcl)?
		.emit()?;

	Ok(())
}
