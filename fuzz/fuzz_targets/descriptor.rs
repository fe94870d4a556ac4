#![no_main]

use libfuzzer_sys::fuzz_target;
use constdesc::constant::{ClassDesc, MethodTypeDesc};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(class) = ClassDesc::of_descriptor(input) {
        assert_eq!(class.descriptor_string(), input);
        let _ = class.array_type();
    }
    if let Ok(method) = MethodTypeDesc::of_descriptor(input) {
        assert_eq!(method.descriptor_string(), input);
    }
    let _ = ClassDesc::of(input);
});
