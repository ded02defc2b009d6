use aoc2023_day_10::part1;

fn main() {
    divan::main();
}

const SAMPLE: &str = "7-F7-
.FJ|7
SJLL7
|F--J
LJ.LJ";

#[divan::bench]
fn bench_part1() {
    part1::process(divan::black_box(SAMPLE)).unwrap();
}
