use aoc2023_day_16::{part1, part2};

fn main() {
    divan::main();
}

const SAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";

#[divan::bench]
fn bench_part1() {
    part1::process(divan::black_box(SAMPLE)).unwrap();
}

#[divan::bench]
fn bench_part2() {
    part2::process(divan::black_box(SAMPLE)).unwrap();
}
