//! FFI call overhead: an empty C function vs an empty Rust function

extern "C" {
    fn primbench_noop();
}

#[inline(never)]
fn native_noop() {
    std::hint::black_box(());
}

/// Call the empty C function `n` times.
pub fn call_ffi(n: u64) {
    for _ in 0..n {
        // SAFETY: `primbench_noop` takes no arguments, touches no state and is
        // linked from csrc/noop.c by the build script.
        unsafe { primbench_noop() };
    }
}

/// Call the empty, never-inlined Rust function `n` times.
pub fn call_native(n: u64) {
    for _ in 0..n {
        native_noop();
    }
}
