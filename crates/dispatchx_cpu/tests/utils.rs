use dispatchx_cpu::utils::{get_strided_index, is_contiguous, strided_span};

#[test]
fn strided_span_covers_last_element() {
    assert_eq!(strided_span(6, &[2, 3], &[3, 1]), 6);
    assert_eq!(strided_span(6, &[3, 2], &[1, 3]), 6);
    assert_eq!(strided_span(2, &[2], &[4]), 5);
    assert_eq!(strided_span(0, &[0, 3], &[3, 1]), 0);
    assert_eq!(strided_span(1, &[], &[]), 1);
}

#[test]
fn strided_span_saturates() {
    assert_eq!(strided_span(3, &[3], &[usize::MAX]), usize::MAX);
}

#[test]
fn strided_index_and_contiguity() {
    assert!(is_contiguous(2, &[2, 3], &[3, 1]));
    assert!(!is_contiguous(2, &[3, 2], &[1, 3]));
    assert!(is_contiguous(2, &[1, 3], &[7, 1]));

    let indices: Vec<usize> = (0..6).map(|i| get_strided_index(i, 2, &[3, 2], &[1, 3])).collect();
    assert_eq!(indices, vec![0, 3, 1, 4, 2, 5]);
}
