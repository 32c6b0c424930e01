mod binary;
mod copy;
mod dispatch;

use criterion::criterion_group;

criterion_group!(benches, binary::basic, copy::basic, dispatch::basic);
