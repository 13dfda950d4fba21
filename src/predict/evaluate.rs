//! Single-point evaluation.

use crate::domain::{FeatureVector, TensorData};
use crate::engine::Model;
use crate::error::AppError;

/// Predict magnetization for one feature vector.
///
/// Runs the model exactly once on a `[1, 3]` tensor and returns the first
/// element of the first output.
pub fn evaluate<M: Model + ?Sized>(model: &mut M, features: FeatureVector) -> Result<f32, AppError> {
    let input = TensorData::from_features(features);
    log::debug!("run shape={:?} data={:?}", input.shape, input.data);

    let outputs = model.run(&input)?;
    let first = outputs
        .first()
        .ok_or_else(|| AppError::inference("Model returned no outputs."))?;
    first
        .data
        .first()
        .copied()
        .ok_or_else(|| AppError::inference("Model returned an empty output tensor."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::StubModel;

    #[test]
    fn constant_model_returns_its_value() {
        let mut model = StubModel::constant(42.0);
        for (t, d, temp) in [(0.0, 0.0, 0.0), (1.5, 2.0, 300.0), (-3.0, 1e6, f32::MAX)] {
            let y = evaluate(&mut model, FeatureVector::new(t, d, temp)).unwrap();
            assert_eq!(y, 42.0);
        }
    }

    #[test]
    fn one_call_with_a_1x3_tensor_in_feature_order() {
        let mut model = StubModel::constant(0.5);
        evaluate(&mut model, FeatureVector::new(1.5, 2.0, 300.0)).unwrap();

        assert_eq!(model.calls.len(), 1);
        assert_eq!(model.calls[0].shape, vec![1, 3]);
        assert_eq!(model.calls[0].data, vec![1.5, 2.0, 300.0]);
    }

    #[test]
    fn reads_first_element_of_first_output() {
        let mut model = StubModel::with(|_| {
            vec![
                TensorData::new(vec![1, 2], vec![7.0, 8.0]),
                TensorData::scalar(9.0),
            ]
        });
        let y = evaluate(&mut model, FeatureVector::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(y, 7.0);
    }

    #[test]
    fn engine_failure_propagates() {
        let mut model = StubModel::constant(1.0).failing_at(0);
        let err = evaluate(&mut model, FeatureVector::new(1.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Inference);
        assert_eq!(model.calls.len(), 1);
    }

    #[test]
    fn missing_or_empty_output_is_an_inference_error() {
        let mut none = StubModel::with(|_| Vec::new());
        let err = evaluate(&mut none, FeatureVector::new(1.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Inference);

        let mut empty = StubModel::with(|_| vec![TensorData::new(vec![1, 0], Vec::new())]);
        let err = evaluate(&mut empty, FeatureVector::new(1.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Inference);
    }
}
