//! Transducer and resolver throughput.
//!
//! Measures conversion of generated documents with growing numbers of
//! paragraphs, lists and tables.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fomake::{Converter, ConverterConfig, parse_document};
use fomake_style::ResolvedStyle;
use std::hint::black_box;

/// A report with `sections` sections, each holding styled text, a list and
/// a small table.
fn generate_document(sections: usize) -> String {
    let mut body = String::new();
    for i in 0..sections {
        body.push_str(&format!(
            r##"<fo:block font-size="14pt" font-weight="bold" space-before="12pt">Section {i}</fo:block>
               <fo:block>Paragraph with <fo:inline font-style="italic">emphasis</fo:inline> and
                 <fo:inline color="#336699">color</fo:inline> in section {i}.</fo:block>
               <fo:list-block>
                 <fo:list-item><fo:list-item-label><fo:block>1.</fo:block></fo:list-item-label>
                   <fo:list-item-body><fo:block>First point</fo:block></fo:list-item-body></fo:list-item>
                 <fo:list-item><fo:list-item-label><fo:block>2.</fo:block></fo:list-item-label>
                   <fo:list-item-body><fo:block>Second point</fo:block></fo:list-item-body></fo:list-item>
               </fo:list-block>
               <fo:table>
                 <fo:table-column column-width="30%"/><fo:table-column column-width="proportional-column-width(1)"/>
                 <fo:table-body>
                   <fo:table-row><fo:table-cell><fo:block>Key</fo:block></fo:table-cell>
                     <fo:table-cell><fo:block>Value {i}</fo:block></fo:table-cell></fo:table-row>
                 </fo:table-body>
               </fo:table>"##
        ));
    }
    format!(
        r#"<fo:root xmlns:fo="http://www.w3.org/1999/XSL/Format">
             <fo:layout-master-set>
               <fo:simple-page-master master-name="page" page-width="210mm" page-height="297mm" margin="2cm">
                 <fo:region-body/><fo:region-before extent="1cm"/><fo:region-after extent="1cm"/>
               </fo:simple-page-master>
             </fo:layout-master-set>
             <fo:page-sequence master-reference="page">
               <fo:static-content flow-name="xsl-region-before"><fo:block>Header</fo:block></fo:static-content>
               <fo:flow flow-name="xsl-region-body">{body}</fo:flow>
             </fo:page-sequence>
           </fo:root>"#
    )
}

/// A single block nested `depth` inlines deep.
fn generate_nested(depth: usize) -> String {
    let mut markup = String::from(r#"<fo:block xmlns:fo="http://www.w3.org/1999/XSL/Format">"#);
    for _ in 0..depth {
        markup.push_str(r#"<fo:inline font-weight="bold">x"#);
    }
    for _ in 0..depth {
        markup.push_str("</fo:inline>");
    }
    markup.push_str("</fo:block>");
    markup
}

fn benchmark_document_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_conversion");
    let converter = Converter::new(&ConverterConfig::default()).expect("default config is valid");

    for sections in [10, 100, 1000] {
        let markup = generate_document(sections);
        let document = parse_document(&markup).expect("generated markup parses");
        group.throughput(Throughput::Elements(sections as u64));

        group.bench_with_input(BenchmarkId::new("parse_and_convert", sections), &markup, |b, markup| {
            b.iter(|| converter.convert_str(black_box(markup)).expect("conversion succeeds"))
        });
        group.bench_with_input(BenchmarkId::new("convert_only", sections), &document, |b, document| {
            b.iter(|| converter.convert_element(black_box(document)))
        });
    }
    group.finish();
}

fn benchmark_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting_depth");
    let converter = Converter::new(&ConverterConfig::default()).expect("default config is valid");
    let transducer = converter.resolver().transducer();

    for depth in [10, 100, 1000] {
        let document = parse_document(&generate_nested(depth)).expect("generated markup parses");
        group.bench_with_input(BenchmarkId::from_parameter(depth), &document, |b, document| {
            b.iter(|| transducer.transduce(black_box(document), &ResolvedStyle::default()))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_document_conversion, benchmark_nesting_depth);
criterion_main!(benches);
