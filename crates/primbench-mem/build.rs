fn main() {
    println!("cargo:rerun-if-changed=csrc/noop.c");
    cc::Build::new()
        .file("csrc/noop.c")
        .opt_level(2)
        .compile("primbench_noop");
}
