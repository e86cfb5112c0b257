use std::collections::HashMap;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use popcsq::annotate::ann::FeatureBiotype;
use popcsq::annotate::csq::{classify, PositionalOverlap, Strand, TranscriptContext};
use popcsq::common::contig::Contig;
use popcsq::freqs::reading::{parse_line, Reader};

const LINE: &str = "1\t13380\t.\tC\tG,T\t4537.38\tRF\tAC=12,1;AF=3.64e-04,3.03e-05;AN=32988;\
    AC_AFR=0,0;AC_AMR=0,0;AC_ASJ=0,0;AC_EAS=2,1;AC_FIN=0;AC_NFE=10,0;AC_OTH=0,0;AN_AFR=3718;\
    AN_AMR=538;AN_ASJ=178;AN_EAS=1174;AN_FIN=2944;AN_NFE=23542;AN_OTH=894;DP=147010";

fn resolver() -> HashMap<String, Contig> {
    HashMap::from([(
        String::from("1"),
        Contig {
            name: String::from("1"),
            accession: String::from("NC_000001.10"),
            chrom_no: 1,
            length: 249_250_621,
        },
    )])
}

fn freqs_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("freqs");
    let resolver = resolver();

    group.bench_function("parse_line", |b| {
        b.iter(|| parse_line(LINE, &resolver).unwrap())
    });

    let input = format!("{}\n", LINE).repeat(1_000);
    group.bench_function("reader", |b| {
        b.iter_batched(
            || input.clone(),
            |input| {
                Reader::new(input.as_bytes(), &resolver)
                    .collect::<Result<Vec<_>, _>>()
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn csq_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("csq");

    let overlap = PositionalOverlap {
        is_start_splice_site: true,
        is_end_splice_site: false,
        before_coding: false,
        after_coding: true,
        within_cdna: true,
    };
    let tx = TranscriptContext {
        strand: Strand::Minus,
        biotype: FeatureBiotype::Coding,
    };

    group.bench_function("classify", |b| b.iter(|| classify(&overlap, &tx)));

    group.finish();
}

criterion_group!(benches, freqs_parsing, csq_classification);
criterion_main!(benches);
