#![allow(unsafe_op_in_unsafe_fn)]

mod scenarios;

use symres::set_debug;

fn main() {
    set_debug(true);
    unsafe {
        scenarios::run_all();
    }
    println!("resolve_test all scenarios passed");
}
