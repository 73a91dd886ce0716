use synthmath::context::Context;
use synthmath::{FracFxP, Lcg, LogFxP, PitchFxP};

const SR_480_VAL: u32 = 0;
const SR_441_VAL: u32 = 1;

#[no_mangle]
pub static SYNTHMATH_SR_480: u32 = SR_480_VAL;
#[no_mangle]
pub static SYNTHMATH_SR_441: u32 = SR_441_VAL;

fn context_from_u32(sr: u32) -> Option<Context> {
    match sr {
        SR_480_VAL => Some(Context::new_480()),
        SR_441_VAL => Some(Context::new_441()),
        _ => None,
    }
}

#[no_mangle]
pub extern "C" fn synthmath_init() {
    synthmath::initialize_tables();
}

#[no_mangle]
pub extern "C" fn synthmath_mtof(pitch: i32) -> u32 {
    synthmath::pitch_to_frequency(PitchFxP::from_bits(pitch)).to_bits()
}

#[no_mangle]
pub extern "C" fn synthmath_mtof_extended(pitch: i32) -> u32 {
    synthmath::pitch_to_frequency_extended(PitchFxP::from_bits(pitch)).to_bits()
}

#[no_mangle]
pub unsafe extern "C" fn synthmath_mtof_sr(sr: u32, pitch: i32, out: *mut u32) -> i32 {
    if out.is_null() {
        return -1;
    }
    let context = match context_from_u32(sr) {
        Some(x) => x,
        None => return -1,
    };
    *out = context.pitch_to_frequency(PitchFxP::from_bits(pitch)).to_bits();
    0
}

#[no_mangle]
pub extern "C" fn synthmath_sine(phase: u32) -> i32 {
    synthmath::evaluate_sine(phase).to_bits()
}

#[no_mangle]
pub extern "C" fn synthmath_window(phase: u32) -> i32 {
    synthmath::evaluate_window(phase).to_bits()
}

#[no_mangle]
pub extern "C" fn synthmath_fast_log2(value: u32) -> i32 {
    synthmath::fast_log2(value).to_bits()
}

#[no_mangle]
pub extern "C" fn synthmath_fast_exp2(x: i32) -> u32 {
    synthmath::fast_exp2(LogFxP::from_bits(x))
}

#[no_mangle]
pub extern "C" fn synthmath_int_to_frac(i: i32) -> i32 {
    synthmath::int_to_frac(i).to_bits()
}

#[no_mangle]
pub extern "C" fn synthmath_frac_to_int(x: i32) -> i32 {
    synthmath::frac_to_int(FracFxP::from_bits(x))
}

#[no_mangle]
pub extern "C" fn synthmath_float_to_frac(f: f32) -> i32 {
    synthmath::float_to_frac(f).to_bits()
}

#[no_mangle]
pub extern "C" fn synthmath_random() -> u32 {
    synthmath::next_random()
}

#[no_mangle]
pub extern "C" fn synthmath_random_seed(seed: u32) {
    synthmath::seed_random(seed);
}

#[no_mangle]
pub extern "C" fn synthmath_rng_new(seed: u32) -> *mut Lcg {
    Box::into_raw(Box::new(Lcg::new(seed)))
}

#[no_mangle]
pub unsafe extern "C" fn synthmath_rng_free(p: *mut Lcg) {
    if !p.is_null() {
        let _ = Box::from_raw(p);
    }
}

#[no_mangle]
pub unsafe extern "C" fn synthmath_rng_next(p: *mut Lcg, out: *mut u32) -> i32 {
    if p.is_null() || out.is_null() {
        return -1;
    }
    *out = (*p).next_random();
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mtof_by_sample_rate() {
        let mut out = 0u32;
        let pitch = synthmath::int_to_frac(5).to_bits();
        unsafe {
            assert_eq!(synthmath_mtof_sr(SYNTHMATH_SR_480, pitch, &mut out), 0);
            assert_eq!(out, synthmath_mtof(pitch));
            assert_eq!(synthmath_mtof_sr(SYNTHMATH_SR_441, pitch, &mut out), 0);
            assert!(out > synthmath_mtof(pitch));
            assert_eq!(synthmath_mtof_sr(7, pitch, &mut out), -1);
            assert_eq!(synthmath_mtof_sr(SYNTHMATH_SR_480, pitch, core::ptr::null_mut()), -1);
        }
    }

    #[test]
    fn boxed_rng() {
        let mut reference = Lcg::new(42);
        let p = synthmath_rng_new(42);
        let mut out = 0u32;
        unsafe {
            for _ in 0..10 {
                assert_eq!(synthmath_rng_next(p, &mut out), 0);
                assert_eq!(out, reference.next_random());
            }
            assert_eq!(synthmath_rng_next(core::ptr::null_mut(), &mut out), -1);
            synthmath_rng_free(p);
            synthmath_rng_free(core::ptr::null_mut());
        }
    }

    #[test]
    fn conversions() {
        synthmath_init();
        assert_eq!(synthmath_frac_to_int(synthmath_int_to_frac(-7)), -7);
        assert_eq!(synthmath_float_to_frac(0.5), 1 << 20);
        assert_eq!(synthmath_fast_log2(1024), 10 << 23);
        assert_eq!(synthmath_fast_exp2(10 << 23), 1024);
        assert_eq!(synthmath_sine(0), 0);
        assert_eq!(synthmath_window(0), 0);
    }
}
