use abi_core::types::{Address, Value};
use abi_core::{decode, encode};
use alloy_sol_types::{sol, SolType};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ethers::abi::AbiDecode;
use ethers::types::U256 as EthersU256;
use num_bigint::BigUint;

sol! {
    struct SimpleTuple {
        uint256 a;
        address b;
        bool c;
    }
}

fn bench_uint256(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decoding/Uint256");

    let mut data = [0u8; 32];
    data[31] = 1;

    group.bench_function("abi-core", |b| {
        b.iter(|| {
            let res = decode("uint256", black_box(&data)).unwrap();
            black_box(res);
        })
    });

    group.bench_function("alloy", |b| {
        b.iter(|| {
            let res = <alloy_sol_types::sol_data::Uint<256>>::abi_decode(black_box(&data), true).unwrap();
            black_box(res);
        })
    });

    group.bench_function("ethers", |b| {
        b.iter(|| {
            let res = EthersU256::decode(black_box(&data[..])).unwrap();
            black_box(res);
        })
    });

    group.finish();
}

fn bench_simple_tuple(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decoding/SimpleTuple");

    let mut data = Vec::new();
    let mut p1 = [0u8; 32];
    p1[31] = 1;
    data.extend_from_slice(&p1);
    let mut p2 = [0u8; 32];
    p2[31] = 0xAA;
    data.extend_from_slice(&p2);
    let mut p3 = [0u8; 32];
    p3[31] = 1;
    data.extend_from_slice(&p3);

    let data_slice = data.as_slice();

    group.bench_function("abi-core", |b| {
        b.iter(|| {
            let res = decode("(uint256,address,bool)", black_box(data_slice)).unwrap();
            black_box(res);
        })
    });

    group.bench_function("alloy", |b| {
        b.iter(|| {
            let res = SimpleTuple::abi_decode(black_box(data_slice), true).unwrap();
            black_box(res);
        })
    });

    let params = vec![
        ethers::abi::ParamType::Uint(256),
        ethers::abi::ParamType::Address,
        ethers::abi::ParamType::Bool,
    ];
    group.bench_function("ethers", |b| {
        b.iter(|| {
            let res = ethers::abi::decode(&params, black_box(data_slice)).unwrap();
            black_box(res);
        })
    });

    group.finish();
}

fn bench_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decoding/HeavyArray");

    let mut data = Vec::new();
    for i in 0..100u8 {
        let mut word = [0u8; 32];
        word[31] = i;
        data.extend_from_slice(&word);
    }
    let data_slice = data.as_slice();

    group.bench_function("abi-core", |b| {
        b.iter(|| {
            let res = decode("uint256[100]", black_box(data_slice)).unwrap();
            black_box(res);
        })
    });

    group.bench_function("alloy", |b| {
        b.iter(|| {
            let res =
                <alloy_sol_types::sol_data::FixedArray<alloy_sol_types::sol_data::Uint<256>, 100>>::abi_decode(
                    black_box(data_slice),
                    true,
                )
                .unwrap();
            black_box(res);
        })
    });

    let params = vec![ethers::abi::ParamType::FixedArray(
        Box::new(ethers::abi::ParamType::Uint(256)),
        100,
    )];
    group.bench_function("ethers", |b| {
        b.iter(|| {
            let res = ethers::abi::decode(&params, black_box(data_slice)).unwrap();
            black_box(res);
        })
    });

    group.finish();
}

fn bench_encode_dynamic_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encoding/DynamicArray");

    let value = Value::Array((0..100).map(|i| Value::Uint(BigUint::from(i as u32))).collect());

    group.bench_function("abi-core", |b| {
        b.iter(|| {
            let res = encode("uint256[]", black_box(&value)).unwrap();
            black_box(res);
        })
    });

    group.finish();
}

fn bench_encode_address_tuple(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encoding/AddressTuple");

    let value = Value::Tuple(vec![
        Value::Address(Address([0xab; 20])),
        Value::Uint(BigUint::from(400_000_000_000u64)),
    ]);

    group.bench_function("abi-core", |b| {
        b.iter(|| {
            let res = encode("(address,uint256)", black_box(&value)).unwrap();
            black_box(res);
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_uint256,
    bench_simple_tuple,
    bench_array,
    bench_encode_dynamic_array,
    bench_encode_address_tuple
);
criterion_main!(benches);
